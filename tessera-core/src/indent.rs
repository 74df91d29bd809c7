//! Indentation used by the text renderers.

/// One level of indentation in rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent {
    width: u8,
}

impl Indent {
    /// Two spaces, as in the JavaScript, JSON and CSS outputs.
    pub const JS: Self = Self { width: 2 };

    /// The text of one indentation level.
    pub fn unit(&self) -> String {
        " ".repeat(usize::from(self.width))
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::JS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit() {
        assert_eq!(Indent::JS.unit(), "  ");
        assert_eq!(Indent::default(), Indent::JS);
    }
}
