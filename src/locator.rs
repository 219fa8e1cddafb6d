//! Element addressing for page checks
//!
//! Elements are located the way the app's pages expose them: by accessible
//! role and label ("heading named My Listings"), by CSS selector, or by
//! visible text content.

use std::fmt;

/// How an element is addressed on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// Accessible role plus visible name
    Role { role: Role, name: String },

    /// CSS selector
    Css { selector: String },

    /// Visible text content
    Text { text: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Heading,
    Link,
    Button,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Heading => "heading",
            Role::Link => "link",
            Role::Button => "button",
        }
    }
}

impl Locator {
    pub fn heading(name: impl Into<String>) -> Self {
        Locator::Role { role: Role::Heading, name: name.into() }
    }

    pub fn link(name: impl Into<String>) -> Self {
        Locator::Role { role: Role::Link, name: name.into() }
    }

    pub fn button(name: impl Into<String>) -> Self {
        Locator::Role { role: Role::Button, name: name.into() }
    }

    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css { selector: selector.into() }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Locator::Text { text: text.into() }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Role { role, name } => write!(f, "{}={}", role.as_str(), name),
            Locator::Css { selector } => write!(f, "css={}", selector),
            Locator::Text { text } => write!(f, "text={}", text),
        }
    }
}
