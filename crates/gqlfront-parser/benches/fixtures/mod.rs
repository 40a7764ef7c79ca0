use std::fmt::Write;

pub mod operations;

pub const STARWARS_SCHEMA: &str = include_str!("starwars_schema.graphql");
pub const SIMPLE_QUERY: &str = "{ hero { name } }";
pub const COMPLEX_QUERY: &str = include_str!("complex_query.graphql");

/// Generates a schema with `type_count` object types, each with an
/// interface, a handful of described fields, and arguments with defaults.
pub fn synthetic_schema(type_count: usize) -> String {
    let mut out = String::with_capacity(type_count * 400);
    out.push_str("interface Node {\n  id: ID!\n}\n\n");
    out.push_str("enum Order {\n  ASC\n  DESC\n}\n\n");
    out.push_str("type Query {\n");
    for i in 0..type_count {
        let _ = writeln!(out, "  type{i}(id: ID!): Type{i}");
    }
    out.push_str("}\n\n");
    for i in 0..type_count {
        let _ = writeln!(out, "\"\"\"\nObject number {i}.\n\"\"\"");
        let _ = writeln!(out, "type Type{i} implements Node @typePolicy(keyFields: \"id\") {{");
        out.push_str("  id: ID!\n");
        out.push_str("  \"The display name.\"\n  name: String\n");
        let _ = writeln!(
            out,
            "  related(first: Int = 10, order: Order = ASC): [Type{}!]!",
            (i + 1) % type_count.max(1),
        );
        out.push_str("  score: Float @deprecated(reason: \"Use rank\")\n");
        out.push_str("}\n\n");
    }
    out
}
