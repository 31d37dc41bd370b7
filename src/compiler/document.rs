//! compiler::document
//!
//! Fixed framing of the generated headers.
//!
//! Each header opens with a banner naming the generating command and an
//! include guard, followed by any configured `#include` lines. The
//! finalizer closes the guard. Everything in between comes from the schema.

use std::ffi::OsStr;
use std::io::Write;

use super::emit::Outputs;
use super::error::CompileError;
use crate::core::types::{GuardSymbol, IncludeName, Sink};

/// Guard and includes for one header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLayout {
    pub guard: GuardSymbol,
    pub includes: Vec<IncludeName>,
}

impl HeaderLayout {
    /// The stock layout for the given header.
    pub fn default_for(sink: Sink) -> Self {
        Self {
            guard: GuardSymbol::default_for(sink),
            includes: IncludeName::defaults_for(sink),
        }
    }

    /// Text written after the banner and before any schema output.
    pub fn prologue(&self) -> String {
        let mut text = format!("#ifndef {0}\n#define {0}\n\n", self.guard);
        for include in &self.includes {
            text.push_str(&format!("#include \"{include}\"\n"));
        }
        if !self.includes.is_empty() {
            text.push('\n');
        }
        text
    }
}

/// Framing for both headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLayout {
    /// Command line recorded in the banner.
    pub banner_command: String,
    pub internal: HeaderLayout,
    pub public: HeaderLayout,
}

impl DocumentLayout {
    /// Stock layout with the given banner command.
    pub fn new(banner_command: impl Into<String>) -> Self {
        Self {
            banner_command: banner_command.into(),
            internal: HeaderLayout::default_for(Sink::Internal),
            public: HeaderLayout::default_for(Sink::Public),
        }
    }

    /// Layout of the given header.
    pub fn header(&self, sink: Sink) -> &HeaderLayout {
        match sink {
            Sink::Internal => &self.internal,
            Sink::Public => &self.public,
        }
    }

    /// The banner shared by both headers, including its trailing blank line.
    ///
    /// # Example
    ///
    /// ```
    /// use makedmt::compiler::document::DocumentLayout;
    ///
    /// let layout = DocumentLayout::new("makedmt generate");
    /// assert_eq!(layout.banner(), "/* Generated by makedmt generate */\n\n");
    /// ```
    pub fn banner(&self) -> String {
        format!("/* Generated by {} */\n\n", self.banner_command)
    }

    /// Write banner, guard and includes to both headers.
    pub fn write_prologue<I: Write, P: Write>(
        &self,
        out: &mut Outputs<I, P>,
    ) -> Result<(), CompileError> {
        let banner = self.banner();
        for sink in Sink::ALL {
            out.raw(sink, &banner)?;
            out.raw(sink, &self.header(sink).prologue())?;
        }
        Ok(())
    }

    /// Close the include guard of both headers.
    pub fn write_epilogue<I: Write, P: Write>(
        &self,
        out: &mut Outputs<I, P>,
    ) -> Result<(), CompileError> {
        for sink in Sink::ALL {
            out.raw(sink, "#endif\n")?;
        }
        Ok(())
    }
}

/// Join a program name and its arguments the way the banner records them.
///
/// Arguments that are not valid UTF-8 are converted lossily.
pub fn command_line<S: AsRef<OsStr>>(args: impl IntoIterator<Item = S>) -> String {
    args.into_iter()
        .map(|arg| arg.as_ref().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_prologue_includes_p_data() {
        let layout = HeaderLayout::default_for(Sink::Internal);
        assert_eq!(
            layout.prologue(),
            "#ifndef __DOOMSDAY_PLAY_MAP_DATA_TYPES_H__\n\
             #define __DOOMSDAY_PLAY_MAP_DATA_TYPES_H__\n\
             \n\
             #include \"p_data.h\"\n\
             \n"
        );
    }

    #[test]
    fn public_prologue_has_no_includes() {
        let layout = HeaderLayout::default_for(Sink::Public);
        assert_eq!(
            layout.prologue(),
            "#ifndef __DOOMSDAY_PLAY_PUBLIC_MAP_DATA_TYPES_H__\n\
             #define __DOOMSDAY_PLAY_PUBLIC_MAP_DATA_TYPES_H__\n\
             \n"
        );
    }

    #[test]
    fn multiple_includes_share_one_blank_line() {
        let layout = HeaderLayout {
            guard: GuardSymbol::new("G").unwrap(),
            includes: vec![
                IncludeName::new("a.h").unwrap(),
                IncludeName::new("b.h").unwrap(),
            ],
        };
        assert_eq!(
            layout.prologue(),
            "#ifndef G\n#define G\n\n#include \"a.h\"\n#include \"b.h\"\n\n"
        );
    }

    #[test]
    fn guards_differ_between_headers() {
        let layout = DocumentLayout::new("x");
        assert_ne!(layout.internal.guard, layout.public.guard);
    }

    #[test]
    fn prologue_and_epilogue_frame_both_headers() {
        let layout = DocumentLayout::new("gen");
        let mut out = Outputs::in_memory();
        layout.write_prologue(&mut out).unwrap();
        layout.write_epilogue(&mut out).unwrap();

        let (internal, public) = out.into_inner();
        let internal = String::from_utf8(internal).unwrap();
        let public = String::from_utf8(public).unwrap();

        assert!(internal.starts_with("/* Generated by gen */\n\n#ifndef "));
        assert!(public.starts_with("/* Generated by gen */\n\n#ifndef "));
        assert!(internal.ends_with("\n#endif\n"));
        assert!(public.ends_with("\n\n#endif\n"));
    }

    #[test]
    fn command_line_joins_with_spaces() {
        assert_eq!(
            command_line(["Scripts/makedmt.py"]),
            "Scripts/makedmt.py"
        );
        assert_eq!(
            command_line(vec!["makedmt".to_string(), "generate".to_string()]),
            "makedmt generate"
        );
    }

    #[cfg(unix)]
    #[test]
    fn command_line_tolerates_non_utf8_arguments() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let args = vec![
            OsString::from("makedmt"),
            OsString::from("generate"),
            OsString::from_vec(vec![b's', 0xe9, b'.', b'd', b'm', b't']),
        ];
        assert_eq!(command_line(args), "makedmt generate s\u{FFFD}.dmt");
    }
}
