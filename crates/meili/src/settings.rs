//! Index setting categories exposed by the engine's settings API.

/// A single settings category, addressed as
/// `/indexes/{uid}/settings/{path}` on the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingCategory {
    SearchableAttributes,
    FilterableAttributes,
    SortableAttributes,
    RankingRules,
    DisplayedAttributes,
    StopWords,
    Synonyms,
    TypoTolerance,
}

impl SettingCategory {
    /// URL path segment under `/settings/`.
    pub fn path(self) -> &'static str {
        match self {
            Self::SearchableAttributes => "searchable-attributes",
            Self::FilterableAttributes => "filterable-attributes",
            Self::SortableAttributes => "sortable-attributes",
            Self::RankingRules => "ranking-rules",
            Self::DisplayedAttributes => "displayed-attributes",
            Self::StopWords => "stop-words",
            Self::Synonyms => "synonyms",
            Self::TypoTolerance => "typo-tolerance",
        }
    }
}

impl std::fmt::Display for SettingCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
