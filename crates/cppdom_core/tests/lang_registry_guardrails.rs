use std::collections::HashMap;

use cppdom_core::lang::keywords::{self, KeywordCategory, KeywordId};
use cppdom_core::lang::operators;
use cppdom_core::lang::punctuation;

#[test]
fn keywords_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, keywords::KeywordId> = HashMap::new();

    for info in keywords::KEYWORDS {
        assert_eq!(
            keywords::from_str(info.canonical),
            Some(info.id),
            "keyword canonical spelling not resolvable: {}",
            info.canonical
        );
        assert_eq!(
            keywords::as_str(info.id),
            info.canonical,
            "keyword as_str mismatch for {:?}",
            info.id
        );

        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!(
                "duplicate keyword spelling {:?}: {:?} and {:?}",
                info.canonical, prev, info.id
            );
        }

        for &alias in info.aliases {
            assert_eq!(
                keywords::from_str(alias),
                Some(info.id),
                "keyword alias not resolvable: {}",
                alias
            );
            if let Some(prev) = seen.insert(alias, info.id) {
                panic!(
                    "duplicate keyword alias spelling {:?}: {:?} and {:?}",
                    alias, prev, info.id
                );
            }
        }
    }
}

#[test]
fn operators_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, operators::OperatorId> = HashMap::new();

    for info in operators::OPERATORS {
        assert_eq!(operators::from_str(info.canonical), Some(info.id));
        assert_eq!(operators::as_str(info.id), info.canonical);
        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!(
                "duplicate operator spelling {:?}: {:?} and {:?}",
                info.canonical, prev, info.id
            );
        }
    }
}

#[test]
fn punctuation_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, punctuation::PunctuationId> = HashMap::new();

    for info in punctuation::PUNCTUATION {
        assert_eq!(punctuation::from_str(info.canonical), Some(info.id));
        assert_eq!(punctuation::as_str(info.id), info.canonical);
        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!(
                "duplicate punctuation spelling {:?}: {:?} and {:?}",
                info.canonical, prev, info.id
            );
        }
    }
}

#[test]
fn keyword_spellings_never_collide_with_symbols() {
    for info in keywords::KEYWORDS {
        assert!(operators::from_str(info.canonical).is_none());
        assert!(punctuation::from_str(info.canonical).is_none());
    }
}

#[test]
fn every_declaration_specifier_keyword_is_classified() {
    // The tree builder dispatches on these categories; each specifier keyword must land in exactly one of them.
    let specifiers = [
        KeywordId::Auto,
        KeywordId::Register,
        KeywordId::Static,
        KeywordId::Extern,
        KeywordId::Mutable,
        KeywordId::Inline,
        KeywordId::Virtual,
        KeywordId::Explicit,
        KeywordId::Typedef,
        KeywordId::Friend,
        KeywordId::Const,
        KeywordId::Volatile,
        KeywordId::Char,
        KeywordId::WcharT,
        KeywordId::Bool,
        KeywordId::Int,
        KeywordId::Float,
        KeywordId::Double,
        KeywordId::Void,
        KeywordId::Short,
        KeywordId::Long,
        KeywordId::Signed,
        KeywordId::Unsigned,
    ];
    for id in specifiers {
        assert!(
            keywords::category(id).is_simple_decl_specifier(),
            "{:?} should be a simple decl specifier",
            id
        );
    }

    for id in [KeywordId::Class, KeywordId::Struct, KeywordId::Union] {
        assert_eq!(keywords::category(id), KeywordCategory::ClassKey);
        assert!(!keywords::category(id).is_simple_decl_specifier());
    }
    for id in [KeywordId::Public, KeywordId::Protected, KeywordId::Private] {
        assert_eq!(keywords::category(id), KeywordCategory::Access);
    }
}
