//! Content kinds and the requests that create them.

use std::fmt;
use std::rc::Rc;

/// A callback run by the event loop.
pub type Callback = Rc<dyn Fn()>;

/// Wrap a closure as a [`Callback`].
pub fn callback(f: impl Fn() + 'static) -> Callback {
    Rc::new(f)
}

/// The kinds of content a form can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentTag {
    Button,
    Entry,
    Text,
    Label,
    Options,
    Checkbox,
}

impl ContentTag {
    pub const ALL: [ContentTag; 6] = [
        ContentTag::Button,
        ContentTag::Entry,
        ContentTag::Text,
        ContentTag::Label,
        ContentTag::Options,
        ContentTag::Checkbox,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ContentTag::Button => "button",
            ContentTag::Entry => "entry",
            ContentTag::Text => "text",
            ContentTag::Label => "label",
            ContentTag::Options => "options",
            ContentTag::Checkbox => "checkbox",
        }
    }
}

impl fmt::Display for ContentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A request for one piece of content.
///
/// Every variant carries exactly the options its kind understands.
#[derive(Clone)]
pub enum ContentSpec {
    Button {
        caption: String,
        command: Option<Callback>,
    },
    Label {
        caption: String,
    },
    Entry {
        caption: String,
    },
    Text {
        caption: String,
    },
    Options {
        caption: String,
        choices: Vec<String>,
    },
    Checkbox {
        caption: String,
        on_checked: Callback,
        on_unchecked: Callback,
    },
}

impl ContentSpec {
    pub fn button(caption: impl Into<String>, command: impl Fn() + 'static) -> Self {
        ContentSpec::Button {
            caption: caption.into(),
            command: Some(callback(command)),
        }
    }

    pub fn label(caption: impl Into<String>) -> Self {
        ContentSpec::Label {
            caption: caption.into(),
        }
    }

    pub fn entry(caption: impl Into<String>) -> Self {
        ContentSpec::Entry {
            caption: caption.into(),
        }
    }

    pub fn text(caption: impl Into<String>) -> Self {
        ContentSpec::Text {
            caption: caption.into(),
        }
    }

    pub fn options<I, S>(caption: impl Into<String>, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ContentSpec::Options {
            caption: caption.into(),
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }

    pub fn checkbox(
        caption: impl Into<String>,
        on_checked: impl Fn() + 'static,
        on_unchecked: impl Fn() + 'static,
    ) -> Self {
        ContentSpec::Checkbox {
            caption: caption.into(),
            on_checked: callback(on_checked),
            on_unchecked: callback(on_unchecked),
        }
    }

    pub fn tag(&self) -> ContentTag {
        match self {
            ContentSpec::Button { .. } => ContentTag::Button,
            ContentSpec::Label { .. } => ContentTag::Label,
            ContentSpec::Entry { .. } => ContentTag::Entry,
            ContentSpec::Text { .. } => ContentTag::Text,
            ContentSpec::Options { .. } => ContentTag::Options,
            ContentSpec::Checkbox { .. } => ContentTag::Checkbox,
        }
    }

    pub fn caption(&self) -> &str {
        match self {
            ContentSpec::Button { caption, .. }
            | ContentSpec::Label { caption }
            | ContentSpec::Entry { caption }
            | ContentSpec::Text { caption }
            | ContentSpec::Options { caption, .. }
            | ContentSpec::Checkbox { caption, .. } => caption,
        }
    }
}

impl fmt::Debug for ContentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("ContentSpec");
        debug.field("tag", &self.tag()).field("caption", &self.caption());
        match self {
            ContentSpec::Button { command, .. } => {
                debug.field("command", &command.is_some());
            }
            ContentSpec::Options { choices, .. } => {
                debug.field("choices", choices);
            }
            _ => {}
        }
        debug.finish()
    }
}
