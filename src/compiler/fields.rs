//! compiler::fields
//!
//! Field declarations inside a struct block.
//!
//! A field line has three tokens: `<tag> <c-type> <name>`. It produces one
//! member line in the internal header and, unless the tag is `-`, one
//! accessor macro in the public header.

use std::borrow::Cow;

use crate::core::naming;

/// Type tag marking a field as internal-only (no public accessor).
pub const INTERNAL_ONLY_TAG: &str = "-";

/// Column the member name starts at, measured from the start of the type.
const NAME_COLUMN: usize = 24;

/// Width of the member indent, reserved out of [`NAME_COLUMN`].
const INDENT: usize = 4;

/// One `<tag> <c-type> <name>` declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDecl<'a> {
    /// Reflection type tag, or `-`.
    pub tag: &'a str,
    /// C type, possibly with an array suffix such as `[4]`.
    pub c_type: &'a str,
    /// Member name.
    pub name: &'a str,
}

impl<'a> FieldDecl<'a> {
    /// Build a declaration from exactly three tokens.
    pub fn from_tokens(tokens: &[&'a str]) -> Option<Self> {
        match *tokens {
            [tag, c_type, name] => Some(Self { tag, c_type, name }),
            _ => None,
        }
    }

    /// Whether the field is hidden from the public header.
    pub fn is_internal_only(&self) -> bool {
        self.tag == INTERNAL_ONLY_TAG
    }

    /// The public accessor line, or `None` for internal-only fields.
    ///
    /// # Example
    ///
    /// ```
    /// use makedmt::compiler::fields::FieldDecl;
    ///
    /// let field = FieldDecl { tag: "float", c_type: "float", name: "length" };
    /// assert_eq!(
    ///     field.accessor("seg").as_deref(),
    ///     Some("#define DMT_SEG_LENGTH DDVT_FLOAT")
    /// );
    /// ```
    pub fn accessor(&self, struct_name: &str) -> Option<String> {
        if self.is_internal_only() {
            return None;
        }
        Some(format!(
            "#define {} {}",
            naming::accessor_macro(struct_name, self.name),
            naming::type_tag_value(self.tag)
        ))
    }

    /// The member line for the internal header, without comment.
    ///
    /// # Example
    ///
    /// ```
    /// use makedmt::compiler::fields::FieldDecl;
    ///
    /// let field = FieldDecl { tag: "ptr", c_type: "vertex_s*", name: "v1" };
    /// assert_eq!(field.member_line(), "    struct vertex_s*    v1;");
    ///
    /// let field = FieldDecl { tag: "float", c_type: "float[3]", name: "normal" };
    /// assert_eq!(field.member_line(), "    float               normal[3];");
    /// ```
    pub fn member_line(&self) -> String {
        let (base, suffix) = split_array_suffix(self.c_type);
        let c_type = resolve_c_type(base);
        let padding = member_padding(&c_type);

        format!(
            "    {c_type}{:padding$}{}{suffix};",
            "",
            self.name,
            padding = padding
        )
    }
}

/// Split `base[...]` into `("base", "[...]")` at the first `[`.
pub fn split_array_suffix(c_type: &str) -> (&str, &str) {
    match c_type.find('[') {
        Some(pos) => c_type.split_at(pos),
        None => (c_type, ""),
    }
}

/// Spell a base type, adding `struct` for generated struct tags.
pub fn resolve_c_type(base: &str) -> Cow<'_, str> {
    if naming::refers_to_struct_tag(base) {
        Cow::Owned(format!("struct {base}"))
    } else {
        Cow::Borrowed(base)
    }
}

/// Spaces between a member type and its name.
fn member_padding(c_type: &str) -> usize {
    NAME_COLUMN
        .saturating_sub(c_type.chars().count() + INDENT)
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field<'a>(tag: &'a str, c_type: &'a str, name: &'a str) -> FieldDecl<'a> {
        FieldDecl { tag, c_type, name }
    }

    #[test]
    fn from_tokens_needs_three() {
        assert!(FieldDecl::from_tokens(&["a", "b"]).is_none());
        assert!(FieldDecl::from_tokens(&["a", "b", "c", "d"]).is_none());
        let decl = FieldDecl::from_tokens(&["t", "int", "x"]).unwrap();
        assert_eq!(decl, field("t", "int", "x"));
    }

    #[test]
    fn plain_member_aligned() {
        assert_eq!(field("t", "int", "x").member_line(), "    int                 x;");
        assert_eq!(
            field("fixed", "fixed_t", "x").member_line(),
            "    fixed_t             x;"
        );
    }

    #[test]
    fn member_name_starts_at_column_24() {
        let line = field("t", "byte", "flags").member_line();
        assert_eq!(line.find("flags"), Some(NAME_COLUMN));
    }

    #[test]
    fn array_suffix_follows_name() {
        assert_eq!(
            field("byte", "byte[4]", "rgb").member_line(),
            "    byte                rgb[4];"
        );
    }

    #[test]
    fn only_first_bracket_splits() {
        assert_eq!(split_array_suffix("int[2][3]"), ("int", "[2][3]"));
        assert_eq!(split_array_suffix("int"), ("int", ""));
    }

    #[test]
    fn struct_keyword_for_generated_tags() {
        assert_eq!(resolve_c_type("thing_s"), "struct thing_s");
        assert_eq!(resolve_c_type("thing_t"), "thing_t");
        assert_eq!(
            field("ptr", "sector_s*", "frontsector").member_line(),
            "    struct sector_s*    frontsector;"
        );
    }

    #[test]
    fn array_of_generated_struct() {
        assert_eq!(
            field("-", "plane_s[2]", "planes").member_line(),
            "    struct plane_s      planes[2];"
        );
    }

    #[test]
    fn long_type_gets_single_space() {
        let line = field("-", "runtime_mapdata_header_t", "h").member_line();
        assert_eq!(line, "    runtime_mapdata_header_t h;");

        let line = field("-", "unsigned_long_int_t", "n").member_line();
        assert_eq!(line, "    unsigned_long_int_t n;");
    }

    #[test]
    fn internal_only_has_no_accessor() {
        let decl = field("-", "int", "secret");
        assert!(decl.is_internal_only());
        assert_eq!(decl.accessor("foo"), None);
    }

    #[test]
    fn accessor_uppercases_names() {
        assert_eq!(
            field("t", "int", "x").accessor("Foo").as_deref(),
            Some("#define DMT_FOO_X DDVT_T")
        );
    }
}
