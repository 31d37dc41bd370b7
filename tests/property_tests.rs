//! Property-based tests for the schema compiler.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated schemas.

use std::collections::HashSet;

use proptest::prelude::*;

use makedmt::compiler::{compile_in_memory, DocumentLayout, Generated};
use makedmt::core::types::Fingerprint;

fn layout() -> DocumentLayout {
    DocumentLayout::new("makedmt")
}

fn compile(schema: &str) -> Generated {
    compile_in_memory(schema.as_bytes(), &layout()).unwrap()
}

/// Strategy for C-ish identifiers.
fn identifier() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,11}"
}

/// Strategy for field type tags, including the internal-only tag.
fn type_tag() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("-".to_string()),
        Just("ptr".to_string()),
        Just("int".to_string()),
        Just("float".to_string()),
        "[a-z]{1,6}",
    ]
}

/// Strategy for C types, sometimes with an array suffix or a struct tag.
fn c_type() -> impl Strategy<Value = String> {
    (
        "[a-z][a-z0-9]{0,9}",
        prop::option::of("_s\\*?"),
        prop::option::of("\\[[1-9]\\]"),
    )
        .prop_map(|(base, tag, array)| {
            format!(
                "{base}{}{}",
                tag.unwrap_or_default(),
                array.unwrap_or_default()
            )
        })
}

#[derive(Debug, Clone)]
struct Field {
    tag: String,
    c_type: String,
    name: String,
    comment: Option<String>,
}

#[derive(Debug, Clone)]
struct Struct {
    name: String,
    fields: Vec<Field>,
}

fn field() -> impl Strategy<Value = Field> {
    (
        type_tag(),
        c_type(),
        identifier(),
        prop::option::of("[a-zA-Z ]{0,20}"),
    )
        .prop_map(|(tag, c_type, name, comment)| Field {
            tag,
            c_type,
            name,
            comment,
        })
}

fn schema_struct() -> impl Strategy<Value = Struct> {
    (identifier(), prop::collection::vec(field(), 0..6))
        .prop_map(|(name, fields)| Struct { name, fields })
}

fn render(structs: &[Struct]) -> String {
    let mut schema = String::new();
    for s in structs {
        schema.push_str(&format!("struct {}\n", s.name));
        for f in &s.fields {
            schema.push_str(&format!("    {} {} {}", f.tag, f.c_type, f.name));
            if let Some(comment) = &f.comment {
                schema.push_str(&format!(" // {comment}"));
            }
            schema.push('\n');
        }
        schema.push_str("end\n\n");
    }
    schema
}

/// Lines that classify to nothing: blank, whitespace, or `#` comments.
fn ignorable_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[ \t]{1,8}",
        "[ \t]{0,4}#[ -~]{0,30}",
    ]
}

proptest! {
    /// Fields tagged `-` never produce a public accessor.
    #[test]
    fn internal_only_fields_never_public(structs in prop::collection::vec(schema_struct(), 0..5)) {
        let generated = compile(&render(&structs));

        let accessor = |s: &Struct, f: &Field| {
            format!("#define DMT_{}_{} ", s.name.to_uppercase(), f.name.to_uppercase())
        };
        let public: HashSet<String> = structs
            .iter()
            .flat_map(|s| s.fields.iter().filter(|f| f.tag != "-").map(move |f| accessor(s, f)))
            .collect();

        for s in &structs {
            for f in s.fields.iter().filter(|f| f.tag == "-") {
                let macro_line = accessor(s, f);
                if !public.contains(&macro_line) {
                    prop_assert!(!generated.public.contains(&macro_line));
                }
            }
        }
    }

    /// Every struct produces exactly one typedef, and every field a member line.
    #[test]
    fn every_field_has_a_member(structs in prop::collection::vec(schema_struct(), 0..5)) {
        let generated = compile(&render(&structs));
        let total_fields: usize = structs.iter().map(|s| s.fields.len()).sum();
        let public_fields = structs
            .iter()
            .flat_map(|s| &s.fields)
            .filter(|f| f.tag != "-")
            .count();

        prop_assert_eq!(generated.stats.structs, structs.len());
        prop_assert_eq!(generated.stats.fields, total_fields);
        prop_assert_eq!(generated.stats.accessors, public_fields);
        prop_assert_eq!(
            generated.internal.matches("runtime_mapdata_header_t header;").count(),
            structs.len()
        );
        prop_assert!(generated.final_state.is_idle());
    }

    /// Blank and `#` lines leave both headers as bare framing.
    #[test]
    fn ignorable_input_is_framing_only(lines in prop::collection::vec(ignorable_line(), 0..20)) {
        let mut schema = lines.join("\n");
        schema.push('\n');

        let generated = compile(&schema);
        let empty = compile("");
        prop_assert_eq!(generated.internal, empty.internal);
        prop_assert_eq!(generated.public, empty.public);
    }

    /// Identical input produces byte-identical output.
    #[test]
    fn compilation_is_deterministic(structs in prop::collection::vec(schema_struct(), 0..5)) {
        let schema = render(&structs);
        let first = compile(&schema);
        let second = compile(&schema);
        prop_assert_eq!(&first.internal, &second.internal);
        prop_assert_eq!(&first.public, &second.public);
    }

    /// Fingerprints ignore the banner but nothing else.
    #[test]
    fn fingerprint_ignores_banner(
        structs in prop::collection::vec(schema_struct(), 1..4),
        banner in "[a-z/. -]{1,30}",
    ) {
        let schema = render(&structs);
        let ours = compile(&schema);
        let theirs = compile_in_memory(schema.as_bytes(), &DocumentLayout::new(banner)).unwrap();

        prop_assert_eq!(
            Fingerprint::of_document(ours.internal.as_bytes()),
            Fingerprint::of_document(theirs.internal.as_bytes())
        );
        prop_assert_ne!(
            Fingerprint::of_document(ours.internal.as_bytes()),
            Fingerprint::of_document(compile("").internal.as_bytes())
        );
    }
}
