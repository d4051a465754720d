//! Display-name markup.
//!
//! A property's display name may carry a sentinel that changes how it is laid
//! out. Layout switches match the whole name (case-insensitive); every other
//! tag is a single-character prefix, and the first matching prefix wins.

/// Exact-match names that change the field-width mode for the rest of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutSwitch {
    /// `[centered]`
    Centered,
    /// `[rightbound]`
    RightBound,
    /// `[maxfield]`
    MaxField,
    /// `[minfield]`
    MinField,
}

impl LayoutSwitch {
    pub const ALL: [LayoutSwitch; 4] = [
        LayoutSwitch::Centered,
        LayoutSwitch::RightBound,
        LayoutSwitch::MaxField,
        LayoutSwitch::MinField,
    ];

    pub fn sentinel(self) -> &'static str {
        match self {
            LayoutSwitch::Centered => "[centered]",
            LayoutSwitch::RightBound => "[rightbound]",
            LayoutSwitch::MaxField => "[maxfield]",
            LayoutSwitch::MinField => "[minfield]",
        }
    }
}

pub const LABEL_PREFIX: char = '*';
pub const FOLDOUT_PREFIX: char = '#';
pub const SINGLE_LINE_TEXTURE_PREFIX: char = '%';
pub const DEPENDENT_VISIBLE_PREFIX: char = '^';
pub const LINKED_PREFIX: char = '&';

/// Parsed markup of one property name. Borrowed labels point into the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupTag<'a> {
    /// No markup; the label is the whole name.
    None(&'a str),
    Label(&'a str),
    Foldout(&'a str),
    /// A bare `#` closing the current foldout.
    FoldoutEnd,
    SingleLineTexture(&'a str),
    DependentVisible(&'a str),
    Linked(&'a str),
    LayoutSwitch(LayoutSwitch),
}

impl<'a> MarkupTag<'a> {
    pub fn parse(name: &'a str) -> Self {
        let lowered = name.to_lowercase();
        if let Some(switch) = LayoutSwitch::ALL
            .into_iter()
            .find(|switch| switch.sentinel() == lowered)
        {
            return MarkupTag::LayoutSwitch(switch);
        }

        if let Some(rest) = name.strip_prefix(LABEL_PREFIX) {
            MarkupTag::Label(rest)
        } else if let Some(rest) = name.strip_prefix(FOLDOUT_PREFIX) {
            if rest.trim().is_empty() {
                MarkupTag::FoldoutEnd
            } else {
                MarkupTag::Foldout(rest)
            }
        } else if let Some(rest) = name.strip_prefix(SINGLE_LINE_TEXTURE_PREFIX) {
            MarkupTag::SingleLineTexture(rest)
        } else if let Some(rest) = name.strip_prefix(DEPENDENT_VISIBLE_PREFIX) {
            MarkupTag::DependentVisible(rest)
        } else if let Some(rest) = name.strip_prefix(LINKED_PREFIX) {
            MarkupTag::Linked(rest)
        } else {
            MarkupTag::None(name)
        }
    }

    /// Label left after stripping the sentinel. Empty for switches and terminators.
    pub fn label(&self) -> &'a str {
        match *self {
            MarkupTag::None(label)
            | MarkupTag::Label(label)
            | MarkupTag::Foldout(label)
            | MarkupTag::SingleLineTexture(label)
            | MarkupTag::DependentVisible(label)
            | MarkupTag::Linked(label) => label,
            MarkupTag::FoldoutEnd | MarkupTag::LayoutSwitch(_) => "",
        }
    }
}
