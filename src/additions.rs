//! Addition tab state for the artifact detail view

use serde::{Deserialize, Serialize};

/// Tabs available on the artifact additions pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdditionTab {
    Vulnerability,
    Sbom,
    BuildHistory,
    Summary,
    Dependencies,
    Values,
    Files,
    ModelCard,
}

impl AdditionTab {
    /// Stable link id used by the console markup
    pub fn link_id(self) -> &'static str {
        match self {
            AdditionTab::Vulnerability => "vulnerability",
            AdditionTab::Sbom => "sbom",
            AdditionTab::BuildHistory => "build-history",
            AdditionTab::Summary => "summary",
            AdditionTab::Dependencies => "dependencies",
            AdditionTab::Values => "values",
            AdditionTab::Files => "files",
            AdditionTab::ModelCard => "model-card",
        }
    }

    /// Parse a link id back into a tab
    pub fn from_link_id(link_id: &str) -> Option<Self> {
        match link_id {
            "vulnerability" => Some(AdditionTab::Vulnerability),
            "sbom" => Some(AdditionTab::Sbom),
            "build-history" => Some(AdditionTab::BuildHistory),
            "summary" => Some(AdditionTab::Summary),
            "dependencies" => Some(AdditionTab::Dependencies),
            "values" => Some(AdditionTab::Values),
            "files" => Some(AdditionTab::Files),
            "model-card" => Some(AdditionTab::ModelCard),
            _ => None,
        }
    }

    /// Tab shown when nothing was requested
    ///
    /// Model artifacts open on their model card; everything else opens on
    /// the vulnerability report.
    pub fn default_for(is_model_artifact: bool) -> Self {
        if is_model_artifact {
            AdditionTab::ModelCard
        } else {
            AdditionTab::Vulnerability
        }
    }
}

/// Tab selection state for the additions pane
///
/// A requested tab (say, from a deep link) takes effect at the first
/// [`settle`](Self::settle) and is consumed by it; afterwards the current
/// tab changes only through [`activate`](Self::activate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabState {
    current: AdditionTab,
    requested: Option<AdditionTab>,
}

impl TabState {
    /// Initial state for an artifact, with an optional requested tab
    pub fn new(requested: Option<AdditionTab>, is_model_artifact: bool) -> Self {
        Self {
            current: AdditionTab::default_for(is_model_artifact),
            requested,
        }
    }

    /// Apply a pending request; later calls change nothing
    pub fn settle(&mut self) -> AdditionTab {
        if let Some(tab) = self.requested.take() {
            self.current = tab;
        }
        self.current
    }

    /// Switch to a tab explicitly
    pub fn activate(&mut self, tab: AdditionTab) {
        self.current = tab;
    }

    /// Currently shown tab
    pub fn current(&self) -> AdditionTab {
        self.current
    }
}
