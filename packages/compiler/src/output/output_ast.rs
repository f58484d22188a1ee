//! Output AST
//!
//! The statements and expressions a view descriptor's generated code is built
//! from. Only the JavaScript shapes the code generator produces are modelled.

use crate::parse_util::ParseSourceSpan;

///// Expressions

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Identical,
    NotIdentical,
    And,
    Or,
}

impl BinaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Identical => "===",
            BinaryOperator::NotIdentical => "!==",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    ReadVar(ReadVarExpr),
    ReadProp(ReadPropExpr),
    WriteProp(WritePropExpr),
    InvokeFn(InvokeFunctionExpr),
    Instantiate(InstantiateExpr),
    Literal(LiteralExpr),
    LiteralArray(LiteralArrayExpr),
    LiteralMap(LiteralMapExpr),
    BinaryOp(BinaryOperatorExpr),
    NotExpr(NotExpr),
    ArrowFn(ArrowFunctionExpr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadVarExpr {
    pub name: String,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadPropExpr {
    pub receiver: Box<Expression>,
    pub name: String,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WritePropExpr {
    pub receiver: Box<Expression>,
    pub name: String,
    pub value: Box<Expression>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvokeFunctionExpr {
    pub fn_: Box<Expression>,
    pub args: Vec<Expression>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstantiateExpr {
    pub class_expr: Box<Expression>,
    pub args: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Undefined,
    Null,
    String(String),
    Number(f64),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    pub value: LiteralValue,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralArrayExpr {
    pub entries: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralMapEntry {
    pub key: String,
    pub value: Box<Expression>,
    pub quoted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralMapExpr {
    pub entries: Vec<LiteralMapEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOperatorExpr {
    pub operator: BinaryOperator,
    pub lhs: Box<Expression>,
    pub rhs: Box<Expression>,
    pub source_span: Option<ParseSourceSpan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotExpr {
    pub condition: Box<Expression>,
}

/// A parameterless arrow function with an expression body, `() => body`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowFunctionExpr {
    pub body: Box<Expression>,
}

pub trait ExpressionVisitor<C> {
    fn visit_read_var_expr(&mut self, expr: &ReadVarExpr, context: &mut C);
    fn visit_read_prop_expr(&mut self, expr: &ReadPropExpr, context: &mut C);
    fn visit_write_prop_expr(&mut self, expr: &WritePropExpr, context: &mut C);
    fn visit_invoke_function_expr(&mut self, expr: &InvokeFunctionExpr, context: &mut C);
    fn visit_instantiate_expr(&mut self, expr: &InstantiateExpr, context: &mut C);
    fn visit_literal_expr(&mut self, expr: &LiteralExpr, context: &mut C);
    fn visit_literal_array_expr(&mut self, expr: &LiteralArrayExpr, context: &mut C);
    fn visit_literal_map_expr(&mut self, expr: &LiteralMapExpr, context: &mut C);
    fn visit_binary_operator_expr(&mut self, expr: &BinaryOperatorExpr, context: &mut C);
    fn visit_not_expr(&mut self, expr: &NotExpr, context: &mut C);
    fn visit_arrow_function_expr(&mut self, expr: &ArrowFunctionExpr, context: &mut C);
}

impl Expression {
    pub fn visit_expression<C, V: ExpressionVisitor<C> + ?Sized>(&self, visitor: &mut V, context: &mut C) {
        match self {
            Expression::ReadVar(e) => visitor.visit_read_var_expr(e, context),
            Expression::ReadProp(e) => visitor.visit_read_prop_expr(e, context),
            Expression::WriteProp(e) => visitor.visit_write_prop_expr(e, context),
            Expression::InvokeFn(e) => visitor.visit_invoke_function_expr(e, context),
            Expression::Instantiate(e) => visitor.visit_instantiate_expr(e, context),
            Expression::Literal(e) => visitor.visit_literal_expr(e, context),
            Expression::LiteralArray(e) => visitor.visit_literal_array_expr(e, context),
            Expression::LiteralMap(e) => visitor.visit_literal_map_expr(e, context),
            Expression::BinaryOp(e) => visitor.visit_binary_operator_expr(e, context),
            Expression::NotExpr(e) => visitor.visit_not_expr(e, context),
            Expression::ArrowFn(e) => visitor.visit_arrow_function_expr(e, context),
        }
    }

    pub fn prop(&self, name: impl Into<String>) -> Box<Expression> {
        Box::new(Expression::ReadProp(ReadPropExpr {
            receiver: Box::new(self.clone()),
            name: name.into(),
            source_span: None,
        }))
    }

    pub fn call_fn(&self, args: Vec<Expression>, source_span: Option<ParseSourceSpan>) -> Box<Expression> {
        Box::new(Expression::InvokeFn(InvokeFunctionExpr {
            fn_: Box::new(self.clone()),
            args,
            source_span,
        }))
    }

    pub fn instantiate(&self, args: Vec<Expression>) -> Box<Expression> {
        Box::new(Expression::Instantiate(InstantiateExpr {
            class_expr: Box::new(self.clone()),
            args,
        }))
    }

    pub fn identical(&self, rhs: Box<Expression>) -> Box<Expression> {
        self.binary(BinaryOperator::Identical, rhs)
    }

    pub fn not_identical(&self, rhs: Box<Expression>) -> Box<Expression> {
        self.binary(BinaryOperator::NotIdentical, rhs)
    }

    pub fn and(&self, rhs: Box<Expression>) -> Box<Expression> {
        self.binary(BinaryOperator::And, rhs)
    }

    pub fn or(&self, rhs: Box<Expression>) -> Box<Expression> {
        self.binary(BinaryOperator::Or, rhs)
    }

    fn binary(&self, operator: BinaryOperator, rhs: Box<Expression>) -> Box<Expression> {
        Box::new(Expression::BinaryOp(BinaryOperatorExpr {
            operator,
            lhs: Box::new(self.clone()),
            rhs,
            source_span: None,
        }))
    }

    /// Turns a property read into a write of `value` to the same property.
    /// Returns `None` for anything else.
    pub fn set(&self, value: Box<Expression>) -> Option<Box<Expression>> {
        match self {
            Expression::ReadProp(read) => Some(Box::new(Expression::WriteProp(WritePropExpr {
                receiver: read.receiver.clone(),
                name: read.name.clone(),
                value,
                source_span: read.source_span,
            }))),
            _ => None,
        }
    }

    pub fn to_stmt(&self) -> Statement {
        Statement::Expression(ExpressionStatement {
            expr: Box::new(self.clone()),
        })
    }
}

///// Statements

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    DeclareVar(DeclareVarStmt),
    Expression(ExpressionStatement),
    Return(ReturnStatement),
    IfStmt(IfStmt),
}

/// `const name = value;`
#[derive(Debug, Clone, PartialEq)]
pub struct DeclareVarStmt {
    pub name: String,
    pub value: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub expr: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub value: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Box<Expression>,
    pub true_case: Vec<Statement>,
}

pub trait StatementVisitor<C> {
    fn visit_declare_var_stmt(&mut self, stmt: &DeclareVarStmt, context: &mut C);
    fn visit_expression_stmt(&mut self, stmt: &ExpressionStatement, context: &mut C);
    fn visit_return_stmt(&mut self, stmt: &ReturnStatement, context: &mut C);
    fn visit_if_stmt(&mut self, stmt: &IfStmt, context: &mut C);
}

impl Statement {
    pub fn visit_statement<C, V: StatementVisitor<C> + ?Sized>(&self, visitor: &mut V, context: &mut C) {
        match self {
            Statement::DeclareVar(s) => visitor.visit_declare_var_stmt(s, context),
            Statement::Expression(s) => visitor.visit_expression_stmt(s, context),
            Statement::Return(s) => visitor.visit_return_stmt(s, context),
            Statement::IfStmt(s) => visitor.visit_if_stmt(s, context),
        }
    }
}

// Helper functions for creating common expressions

pub fn variable(name: impl Into<String>) -> Box<Expression> {
    Box::new(Expression::ReadVar(ReadVarExpr {
        name: name.into(),
        source_span: None,
    }))
}

pub fn literal(value: impl Into<LiteralValue>) -> Box<Expression> {
    Box::new(Expression::Literal(LiteralExpr {
        value: value.into(),
        source_span: None,
    }))
}

pub fn undefined_expr() -> Box<Expression> {
    literal(LiteralValue::Undefined)
}

pub fn literal_arr(entries: Vec<Expression>) -> Box<Expression> {
    Box::new(Expression::LiteralArray(LiteralArrayExpr { entries }))
}

pub fn literal_map(entries: Vec<LiteralMapEntry>) -> Box<Expression> {
    Box::new(Expression::LiteralMap(LiteralMapExpr { entries }))
}

pub fn not(expr: Box<Expression>) -> Box<Expression> {
    Box::new(Expression::NotExpr(NotExpr { condition: expr }))
}

pub fn arrow_fn(body: Box<Expression>) -> Box<Expression> {
    Box::new(Expression::ArrowFn(ArrowFunctionExpr { body }))
}

pub fn declare_const(name: impl Into<String>, value: Box<Expression>) -> Statement {
    Statement::DeclareVar(DeclareVarStmt {
        name: name.into(),
        value,
    })
}

pub fn return_stmt(value: Box<Expression>) -> Statement {
    Statement::Return(ReturnStatement { value })
}

pub fn if_stmt(condition: Box<Expression>, true_case: Vec<Statement>) -> Statement {
    Statement::IfStmt(IfStmt { condition, true_case })
}

impl From<String> for LiteralValue {
    fn from(s: String) -> Self {
        LiteralValue::String(s)
    }
}

impl From<&str> for LiteralValue {
    fn from(s: &str) -> Self {
        LiteralValue::String(s.to_string())
    }
}

impl From<f64> for LiteralValue {
    fn from(n: f64) -> Self {
        LiteralValue::Number(n)
    }
}

impl From<bool> for LiteralValue {
    fn from(b: bool) -> Self {
        LiteralValue::Bool(b)
    }
}
