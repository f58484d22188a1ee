//! Component Metadata Loader
//!
//! A structural projection of the declaration: every member is recorded
//! whatever its visibility, and every factory provider is classified as a
//! top-level function or a closure. Only declarations that cannot form a
//! symbol table at all are rejected here.

use std::collections::HashSet;

use super::api::{ComponentMetadata, FactoryReference, MemberDescriptor, ProviderMetadata};
use super::decl::{ComponentDecl, FactoryDecl, MemberKind, ProviderDecl, ProviderStrategy};
use super::MetadataError;
use crate::expression_parser::EVENT_SENTINEL;
use crate::util::is_legal_identifier;

pub fn load(decl: &ComponentDecl) -> Result<ComponentMetadata, MetadataError> {
    let mut seen = HashSet::new();
    let mut members = Vec::with_capacity(decl.members.len());

    for (index, member) in decl.members.iter().enumerate() {
        if !is_legal_identifier(&member.name) || member.name == EVENT_SENTINEL {
            return Err(MetadataError::InvalidMemberName {
                component: decl.name.clone(),
                name: member.name.clone(),
            });
        }
        if !seen.insert(member.name.as_str()) {
            return Err(MetadataError::DuplicateMember {
                component: decl.name.clone(),
                name: member.name.clone(),
            });
        }
        // Fields take no parameters whatever the declaration says.
        let parameters = match member.kind {
            MemberKind::Method => member.parameters.clone(),
            MemberKind::Field => Vec::new(),
        };
        members.push(MemberDescriptor {
            name: member.name.clone(),
            kind: member.kind,
            visibility: member.visibility,
            parameters,
            returns: member.returns,
            initial: member.initial.clone(),
            index,
        });
    }

    let providers = decl
        .providers
        .iter()
        .map(load_provider)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ComponentMetadata {
        name: decl.name.clone(),
        members,
        providers,
    })
}

fn load_provider(provider: &ProviderDecl) -> Result<ProviderMetadata, MetadataError> {
    match provider.strategy {
        ProviderStrategy::Class => {
            let class_name = provider
                .use_class
                .clone()
                .ok_or_else(|| MetadataError::MissingClass {
                    token: provider.token.clone(),
                })?;
            Ok(ProviderMetadata {
                token: provider.token.clone(),
                strategy: ProviderStrategy::Class,
                class_name: Some(class_name),
                factory: None,
                position: provider.position,
            })
        }
        ProviderStrategy::Factory => {
            let factory = provider
                .use_factory
                .as_ref()
                .ok_or_else(|| MetadataError::MissingFactory {
                    token: provider.token.clone(),
                })?;
            Ok(ProviderMetadata {
                token: provider.token.clone(),
                strategy: ProviderStrategy::Factory,
                class_name: None,
                factory: Some(classify_factory(factory)),
                position: provider.position,
            })
        }
    }
}

fn classify_factory(factory: &FactoryDecl) -> FactoryReference {
    match factory {
        FactoryDecl::Named { name, top_level: true } if is_legal_identifier(name) => {
            FactoryReference::TopLevel { name: name.clone() }
        }
        FactoryDecl::Named { name, top_level: true } => FactoryReference::Closure {
            description: name.clone(),
        },
        FactoryDecl::Named { name, top_level: false } => FactoryReference::Closure {
            description: format!("nested function {}", name),
        },
        FactoryDecl::Inline { source } => FactoryReference::Closure {
            description: source.clone(),
        },
    }
}
