//! Trace input selections and their validation.

use std::fmt;

use crate::TraceError;

/// The selection classes a trace requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    /// The driving joint (exactly one).
    Joint,
    /// The planar reference the working sketch is built on (exactly one).
    Reference,
    /// The points whose paths are traced (at least one).
    TrackedPoint,
}

impl fmt::Display for SelectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionKind::Joint => write!(f, "joint"),
            SelectionKind::Reference => write!(f, "reference plane"),
            SelectionKind::TrackedPoint => write!(f, "point"),
        }
    }
}

/// Raw selections as gathered from the user, possibly incomplete.
///
/// Exact counts are enforced by shape: at most one joint and one reference
/// can be held, points are unbounded. [`validate`](TraceSelections::validate)
/// checks the non-empty side of each class.
#[derive(Debug, Clone, Default)]
pub struct TraceSelections {
    /// Selected joint id.
    pub joint: Option<String>,
    /// Selected planar reference id.
    pub reference: Option<String>,
    /// Selected tracked point ids.
    pub points: Vec<String>,
}

impl TraceSelections {
    /// Selections for one joint, one reference, and a set of points.
    pub fn new(
        joint: impl Into<String>,
        reference: impl Into<String>,
        points: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            joint: Some(joint.into()),
            reference: Some(reference.into()),
            points: points.into_iter().map(Into::into).collect(),
        }
    }

    /// Check that every selection class is populated.
    ///
    /// # Errors
    ///
    /// [`TraceError::MissingSelection`] naming the first empty class.
    pub fn validate(&self) -> Result<ValidSelections<'_>, TraceError> {
        let joint = self
            .joint
            .as_deref()
            .ok_or(TraceError::MissingSelection(SelectionKind::Joint))?;
        let reference = self
            .reference
            .as_deref()
            .ok_or(TraceError::MissingSelection(SelectionKind::Reference))?;
        if self.points.is_empty() {
            return Err(TraceError::MissingSelection(SelectionKind::TrackedPoint));
        }
        Ok(ValidSelections {
            joint,
            reference,
            points: &self.points,
        })
    }
}

/// Selections that passed validation: every class is non-empty.
#[derive(Debug, Clone, Copy)]
pub struct ValidSelections<'a> {
    /// The driving joint id.
    pub joint: &'a str,
    /// The planar reference id.
    pub reference: &'a str,
    /// Tracked point ids (never empty).
    pub points: &'a [String],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_selections_validate() {
        let sel = TraceSelections::new("hinge", "base", ["tip", "heel"]);
        let valid = sel.validate().unwrap();
        assert_eq!(valid.joint, "hinge");
        assert_eq!(valid.reference, "base");
        assert_eq!(valid.points.len(), 2);
    }

    #[test]
    fn each_missing_class_is_named() {
        let mut sel = TraceSelections::new("hinge", "base", ["tip"]);
        sel.joint = None;
        assert!(matches!(
            sel.validate(),
            Err(TraceError::MissingSelection(SelectionKind::Joint))
        ));

        let mut sel = TraceSelections::new("hinge", "base", ["tip"]);
        sel.reference = None;
        assert!(matches!(
            sel.validate(),
            Err(TraceError::MissingSelection(SelectionKind::Reference))
        ));

        let mut sel = TraceSelections::new("hinge", "base", ["tip"]);
        sel.points.clear();
        assert!(matches!(
            sel.validate(),
            Err(TraceError::MissingSelection(SelectionKind::TrackedPoint))
        ));
    }
}
