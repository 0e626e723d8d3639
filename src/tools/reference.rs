//! Static reference documents consulted before building where-clauses

const META_KEYS: &str = include_str!("resources/meta_keys.md");
const QUERY_SYNTAX: &str = include_str!("resources/query_syntax.md");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceDoc {
    pub name: &'static str,
    pub uri: &'static str,
    pub description: &'static str,
    pub content: &'static str,
}

pub static REFERENCE_DOCS: [ReferenceDoc; 2] = [
    ReferenceDoc {
        name: "meta-keys",
        uri: "netwitness://meta-keys",
        description: "Available meta keys and their meaning, grouped by protocol",
        content: META_KEYS,
    },
    ReferenceDoc {
        name: "query-syntax",
        uri: "netwitness://query-syntax",
        description: "Where/select clause operators, time ranges and example queries",
        content: QUERY_SYNTAX,
    },
];

/// Look up a document by short name (`meta-keys`) or URI (`netwitness://meta-keys`)
pub fn reference_doc(name: &str) -> Option<&'static ReferenceDoc> {
    REFERENCE_DOCS
        .iter()
        .find(|doc| doc.name == name || doc.uri == name)
}

pub fn meta_keys() -> &'static str {
    META_KEYS
}

pub fn query_syntax() -> &'static str {
    QUERY_SYNTAX
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name_and_uri() {
        assert_eq!(reference_doc("meta-keys").unwrap().content, meta_keys());
        assert_eq!(
            reference_doc("netwitness://query-syntax").unwrap().content,
            query_syntax()
        );
        assert!(reference_doc("netwitness://nope").is_none());
    }

    #[test]
    fn test_documents_are_present() {
        assert!(meta_keys().contains("ip.src"));
        assert!(query_syntax().contains("## WHERE Clause Operators"));
    }
}
