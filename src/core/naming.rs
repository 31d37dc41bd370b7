//! core::naming
//!
//! Naming rules for generated C identifiers.
//!
//! # Conventions
//!
//! - A schema struct `foo` becomes `struct foo_s` with typedef `foo_t`
//! - Field accessors are `DMT_<STRUCT>_<FIELD>` macros
//! - Type tags map to `DDVT_<TAG>` reflection values
//! - C types containing `_s` refer to another generated struct tag and are
//!   spelled with the `struct` keyword

/// Struct tag emitted for a schema struct.
///
/// # Example
///
/// ```
/// use makedmt::core::naming::{struct_tag, typedef_name};
///
/// assert_eq!(struct_tag("vertex"), "vertex_s");
/// assert_eq!(typedef_name("vertex"), "vertex_t");
/// ```
pub fn struct_tag(name: &str) -> String {
    format!("{name}_s")
}

/// Typedef name emitted for a schema struct.
pub fn typedef_name(name: &str) -> String {
    format!("{name}_t")
}

/// Accessor macro name for a field of a schema struct.
///
/// # Example
///
/// ```
/// use makedmt::core::naming::{accessor_macro, type_tag_value};
///
/// assert_eq!(accessor_macro("seg", "v1"), "DMT_SEG_V1");
/// assert_eq!(type_tag_value("ptr"), "DDVT_PTR");
/// ```
pub fn accessor_macro(struct_name: &str, field: &str) -> String {
    format!(
        "DMT_{}_{}",
        struct_name.to_uppercase(),
        field.to_uppercase()
    )
}

/// Reflection value a type tag expands to.
pub fn type_tag_value(tag: &str) -> String {
    format!("DDVT_{}", tag.to_uppercase())
}

/// Whether a base C type names a generated struct tag.
///
/// This is a plain substring test: any type containing `_s` qualifies.
pub fn refers_to_struct_tag(base_type: &str) -> bool {
    base_type.contains("_s")
}
