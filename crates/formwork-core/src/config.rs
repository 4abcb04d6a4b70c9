/// Configuration for forms created through a `FormContext`.
#[derive(Debug, Clone)]
pub struct FormConfig {
    /// Cells added to a caption's length when no explicit width is given.
    pub size_padding: u32,
    /// Height, in lines, used when no explicit size is given.
    pub default_height: u32,
    /// Initial value of an option menu before the user picks anything.
    pub options_placeholder: String,
    /// Whether `show_info` replaces the previous info line by default.
    pub replace_info: bool,
    /// Minimum padding, beyond the title length, of error dialog messages.
    pub message_title_padding: usize,
    /// Filter directive used by [`crate::logging::init`] when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        FormConfig {
            size_padding: 5,
            default_height: 1,
            options_placeholder: "choose an option".to_string(),
            replace_info: true,
            message_title_padding: 15,
            log_filter: "info".to_string(),
        }
    }
}

impl FormConfig {
    pub fn with_options_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.options_placeholder = placeholder.into();
        self
    }

    pub fn with_size_padding(mut self, padding: u32) -> Self {
        self.size_padding = padding;
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }
}
