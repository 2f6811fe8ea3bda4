use crate::view::{DashboardView, Target, SELECTED};

/// The control target currently driven by the local start/stop buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Selection {
    Pump1,
    Pump2,
    Valve,
}

impl Selection {
    pub const ALL: [Selection; 3] = [Selection::Pump1, Selection::Pump2, Selection::Valve];

    /// Parse the wire id (1, 2 or 3)
    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(Selection::Pump1),
            2 => Some(Selection::Pump2),
            3 => Some(Selection::Valve),
            _ => None,
        }
    }

    pub fn id(&self) -> u8 {
        match self {
            Selection::Pump1 => 1,
            Selection::Pump2 => 2,
            Selection::Valve => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Selection::Pump1 => "Pump 1",
            Selection::Pump2 => "Pump 2",
            Selection::Valve => "Valve",
        }
    }
}

/// A selection transition, tagged with where it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    /// Chosen on this dashboard; propagated to the backend
    Local(Selection),
    /// Reported by the backend or another dashboard; never echoed
    Remote(Selection),
}

impl SelectionChange {
    pub fn selection(&self) -> Selection {
        match self {
            SelectionChange::Local(selection) | SelectionChange::Remote(selection) => *selection,
        }
    }

    pub fn should_propagate(&self) -> bool {
        matches!(self, SelectionChange::Local(_))
    }
}

/// Clear the marker from every region, then mark exactly one
pub fn mark_selected<V: DashboardView>(view: &mut V, selection: Selection) {
    for region in Selection::ALL {
        view.toggle_class(Target::ControlRegion(region), SELECTED, false);
    }
    view.toggle_class(Target::ControlRegion(selection), SELECTED, true);
}
