//! Platform detection helpers.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Web,
    Desktop,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Web
        } else {
            Self::Desktop
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Desktop => "desktop",
        }
    }

    /// Whether the display refresh drives the frame tick directly.
    pub fn has_display_refresh(self) -> bool {
        matches!(self, Self::Web)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_builds_report_desktop() {
        assert_eq!(Platform::current(), Platform::Desktop);
        assert_eq!(Platform::current().label(), "desktop");
        assert!(!Platform::current().has_display_refresh());
    }
}
