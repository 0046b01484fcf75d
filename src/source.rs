//! Adapter over the host runtime's stage-level list variables.
//!
//! The reconciler never touches the host directly; it reads through the
//! [`StageSource`] trait so the core stays testable with fixture data.
//! [`StageSnapshot`] is the concrete implementation: a point-in-time copy of
//! `Target.listVariablesOfKind("list")` handed over by the window chrome on
//! each data-refresh tick.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// A scalar element of a list variable.
///
/// The host runtime stores list elements as loosely typed values, so the
/// adapter accepts any of the three scalar JSON shapes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Numeric element.
    Number(f64),
    /// Boolean element.
    Bool(bool),
    /// String element.
    Text(String),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // f64 Display already renders integral values without a
            // fractional part, matching the host's string casts.
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Identity of one visible list variable within a discovery pass.
///
/// Re-derived on every refresh tick; carries no identity across ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRef {
    /// Host-assigned variable id (unique per stage).
    pub id: String,
    /// Display name, used verbatim as the column header.
    pub name: String,
}

/// Read-only view of the host runtime's stage target.
///
/// Reads are simple synchronous value reads; the host must not mutate the
/// backing data mid-pass.
pub trait StageSource {
    /// Every list variable on the stage (including empty ones), in the
    /// host's own order. `None` when no stage target exists.
    fn list_variables(&self) -> Option<Vec<SequenceRef>>;

    /// Elements of one list by id, or `None` if it no longer exists.
    fn values(&self, id: &str) -> Option<&[CellValue]>;
}

/// The ordered set of sequences visible in the table.
///
/// Sorted case-insensitively by name ascending; ties keep the host's
/// discovery order (stable sort). Empty sequences are excluded. A missing
/// stage target yields an empty set rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceSet {
    refs: Vec<SequenceRef>,
}

impl SequenceSet {
    /// Discover the currently visible sequences from `source`.
    pub fn discover(source: &impl StageSource) -> Self {
        let mut refs: Vec<SequenceRef> = source
            .list_variables()
            .unwrap_or_default()
            .into_iter()
            .filter(|r| source.values(&r.id).is_some_and(|v| !v.is_empty()))
            .collect();
        // Uppercase comparison, matching the host UI's variable sort.
        refs.sort_by(|a, b| a.name.to_uppercase().cmp(&b.name.to_uppercase()));
        Self { refs }
    }

    /// Number of sequences in the set.
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    /// Whether the set is empty (no stage, or only empty lists).
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// Sequence at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&SequenceRef> {
        self.refs.get(index)
    }

    /// Iterate the sequences in display order.
    pub fn iter(&self) -> impl Iterator<Item = &SequenceRef> {
        self.refs.iter()
    }

    /// Greatest element count across the set.
    ///
    /// Count-only reduction: which sequence holds the maximum is
    /// deliberately not observable, so ties cannot affect the result.
    pub fn max_len(&self, source: &impl StageSource) -> usize {
        self.refs
            .iter()
            .map(|r| source.values(&r.id).map_or(0, <[CellValue]>::len))
            .max()
            .unwrap_or(0)
    }
}

/// One list variable's data within a snapshot.
#[derive(Debug, Clone, Deserialize)]
struct SequenceData {
    name: String,
    values: Vec<CellValue>,
}

/// Point-in-time copy of the stage's list variables.
///
/// Deserializes from the host's `{id: {name, values}}` mapping. Entry order
/// is preserved so the sort tie-break stays deterministic across ticks.
#[derive(Debug, Clone, Default)]
pub struct StageSnapshot {
    entries: Vec<(String, SequenceData)>,
}

impl StageSnapshot {
    /// Build a snapshot from `(id, name, values)` triples (fixtures, tests).
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, S, Vec<CellValue>)>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(id, name, values)| {
                    (
                        id.into(),
                        SequenceData {
                            name: name.into(),
                            values,
                        },
                    )
                })
                .collect(),
        }
    }
}

impl<'de> Deserialize<'de> for StageSnapshot {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SnapshotVisitor;

        impl<'de> Visitor<'de> for SnapshotVisitor {
            type Value = StageSnapshot;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of variable id to {name, values}")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((id, data)) = map.next_entry::<String, SequenceData>()? {
                    entries.push((id, data));
                }
                Ok(StageSnapshot { entries })
            }
        }

        deserializer.deserialize_map(SnapshotVisitor)
    }
}

/// [`StageSource`] over an optional snapshot.
///
/// `None` models the host having no active stage target; discovery then
/// degrades to an empty set and the table renders as its 1x1 corner-only
/// form.
#[derive(Debug, Clone, Default)]
pub struct SnapshotSource {
    stage: Option<StageSnapshot>,
}

impl SnapshotSource {
    /// Source backed by a stage snapshot.
    pub fn new(snapshot: StageSnapshot) -> Self {
        Self {
            stage: Some(snapshot),
        }
    }

    /// Source with no active stage.
    pub fn no_stage() -> Self {
        Self { stage: None }
    }

    /// Replace the backing snapshot (`None` = stage went away).
    pub fn replace(&mut self, snapshot: Option<StageSnapshot>) {
        self.stage = snapshot;
    }
}

impl StageSource for SnapshotSource {
    fn list_variables(&self) -> Option<Vec<SequenceRef>> {
        let stage = self.stage.as_ref()?;
        Some(
            stage
                .entries
                .iter()
                .map(|(id, data)| SequenceRef {
                    id: id.clone(),
                    name: data.name.clone(),
                })
                .collect(),
        )
    }

    fn values(&self, id: &str) -> Option<&[CellValue]> {
        let stage = self.stage.as_ref()?;
        stage
            .entries
            .iter()
            .find(|(entry_id, _)| entry_id == id)
            .map(|(_, data)| data.values.as_slice())
    }
}
