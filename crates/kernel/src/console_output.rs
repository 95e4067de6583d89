/// Console output formatting directives used by higher-level console printing APIs.
///
/// This enum describes how a given string or character should be emitted on the
/// terminal, including whether to surround it with newlines or clear the screen.
/// Applying these directives is done by [`Terminal::write`](crate::Terminal::write),
/// which keeps the cursor model in step with the output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConsoleFormatting<'a> {
    /// No formatting is done.
    StrNoFormatting(&'a str),
    /// New line is added after write.
    StrNewLineAfter(&'a str),
    /// New line is added before write.
    StrNewLineBefore(&'a str),
    /// New lines are added before and after write.
    StrNewLineBoth(&'a str),
    /// Only adds a new line.
    Newline,
    /// Writes a single character.
    Char(char),
    /// Clears the terminal.
    Clear,
}

impl<'a> ConsoleFormatting<'a> {
    /// Text carried by the directive, if any.
    pub fn text(&self) -> Option<&'a str> {
        match self {
            ConsoleFormatting::StrNoFormatting(l_str)
            | ConsoleFormatting::StrNewLineAfter(l_str)
            | ConsoleFormatting::StrNewLineBefore(l_str)
            | ConsoleFormatting::StrNewLineBoth(l_str) => Some(l_str),
            _ => None,
        }
    }

    pub fn newline_before(&self) -> bool {
        matches!(
            self,
            ConsoleFormatting::StrNewLineBefore(_) | ConsoleFormatting::StrNewLineBoth(_)
        )
    }

    pub fn newline_after(&self) -> bool {
        matches!(
            self,
            ConsoleFormatting::StrNewLineAfter(_)
                | ConsoleFormatting::StrNewLineBoth(_)
                | ConsoleFormatting::Newline
        )
    }
}
