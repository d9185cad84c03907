//! Dashboard session
//!
//! A session owns everything the dashboard shows:
//! - the current slot assignment
//! - the dataset it renders from (read-only)
//! - the plot, error and warning display areas
//!
//! Every event goes through the cascade reducer; on success the display areas are
//! recomputed from the new assignment, on failure nothing changes.

use serde::Serialize;
use tracing::{debug, warn};

use crate::cascade::{available_for, reduce, Assignment, Event};
use crate::plot::{Aesthetic, Column, ScatterPlot};
use crate::render::{render, RenderOutcome};
use crate::{DataFrame, Result};

/// State of one selector control
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Control {
    pub slot: Aesthetic,
    pub title: &'static str,
    /// Hidden controls have no options
    pub visible: bool,
    pub selected: Option<Column>,
    /// Choices in display order; `None` is the unset choice
    pub options: Vec<Option<Column>>,
}

/// The single dashboard session
#[derive(Debug, Clone)]
pub struct Session {
    data: DataFrame,
    assignment: Assignment,
    outcome: RenderOutcome,
}

impl Session {
    /// Create a session with every slot unset
    pub fn new(data: DataFrame) -> Self {
        Self {
            data,
            assignment: Assignment::new(),
            outcome: RenderOutcome::default(),
        }
    }

    /// Apply an event; a rejected event leaves the session untouched
    pub fn apply(&mut self, event: Event) -> Result<()> {
        match reduce(&self.assignment, event) {
            Ok(next) => {
                debug!("{:?}: {} -> {}", event, self.assignment, next);
                self.assignment = next;
                self.refresh();
                Ok(())
            }
            Err(e) => {
                warn!("Rejected {:?}: {}", event, e);
                Err(e)
            }
        }
    }

    pub fn select(&mut self, slot: Aesthetic, column: Option<Column>) -> Result<()> {
        self.apply(Event::Select { slot, column })
    }

    pub fn reset(&mut self) -> Result<()> {
        self.apply(Event::Reset)
    }

    /// Recompute the display areas; an incomplete assignment clears all three
    fn refresh(&mut self) {
        self.outcome = render(&self.assignment, &self.data).unwrap_or_default();
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    pub fn outcome(&self) -> &RenderOutcome {
        &self.outcome
    }

    pub fn plot(&self) -> Option<&ScatterPlot> {
        self.outcome.plot.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.outcome.error.as_deref()
    }

    pub fn warning(&self) -> Option<&str> {
        self.outcome.warning.as_deref()
    }

    /// Selector controls, in selection order
    pub fn controls(&self) -> Vec<Control> {
        Aesthetic::ALL
            .into_iter()
            .map(|slot| {
                let options = available_for(slot, &self.assignment);
                Control {
                    slot,
                    title: slot.title(),
                    visible: options.is_some(),
                    selected: self.assignment.get(slot),
                    options: options.unwrap_or_default(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::mtcars;
    use crate::GgpickError;
    use polars::prelude::{NamedFrom, Series};

    fn session() -> Session {
        Session::new(mtcars().unwrap())
    }

    fn fill(session: &mut Session, columns: [Column; 5]) {
        for (slot, column) in Aesthetic::ALL.into_iter().zip(columns) {
            session.select(slot, Some(column)).unwrap();
        }
    }

    #[test]
    fn test_session_creation() {
        let session = session();
        assert!(session.assignment().is_empty());
        assert!(session.plot().is_none());
        assert!(session.error().is_none());
        assert!(session.warning().is_none());
    }

    #[test]
    fn test_controls_initially() {
        let controls = session().controls();
        assert_eq!(controls.len(), 5);
        assert!(controls[0].visible);
        assert_eq!(controls[0].options.len(), 12);
        assert_eq!(controls[0].title, "X-axis");
        for control in &controls[1..] {
            assert!(!control.visible);
            assert!(control.options.is_empty());
            assert_eq!(control.selected, None);
        }
    }

    #[test]
    fn test_controls_follow_selection() {
        let mut session = session();
        session.select(Aesthetic::X, Some(Column::Mpg)).unwrap();

        let controls = session.controls();
        assert_eq!(controls[0].selected, Some(Column::Mpg));
        assert!(controls[1].visible);
        assert!(!controls[1].options.contains(&Some(Column::Mpg)));
        assert!(!controls[2].visible);
    }

    #[test]
    fn test_full_selection_renders() {
        let mut session = session();
        fill(
            &mut session,
            [Column::Mpg, Column::Hp, Column::Wt, Column::Am, Column::Gear],
        );

        let plot = session.plot().unwrap();
        assert_eq!(plot.label(Aesthetic::Size), Some("Transmission"));
        assert!(session.error().is_none());
        assert!(session.warning().is_none());
    }

    #[test]
    fn test_rejected_selection_keeps_state() {
        let mut session = session();
        fill(
            &mut session,
            [Column::Mpg, Column::Hp, Column::Wt, Column::Am, Column::Gear],
        );
        let before = *session.assignment();

        let result = session.select(Aesthetic::Shape, Some(Column::Mpg));
        assert!(matches!(result, Err(GgpickError::InvalidSelection(_))));
        assert_eq!(*session.assignment(), before);
        assert!(session.plot().is_some());
    }

    #[test]
    fn test_successful_render_clears_error_and_warning() {
        let mut data = mtcars().unwrap();
        let hp: Vec<String> = (0..32).map(|i| format!("hp{}", i)).collect();
        data.replace("hp", Series::new("hp".into(), hp)).unwrap();
        let mut session = Session::new(data);

        // hp is text here and cannot go on a continuous axis
        fill(
            &mut session,
            [Column::Mpg, Column::Hp, Column::Wt, Column::Am, Column::Gear],
        );
        assert!(session.plot().is_none());
        assert!(session.error().is_some());

        // Changing y drops the downstream slots and clears the error
        session.select(Aesthetic::Y, Some(Column::Disp)).unwrap();
        assert!(session.error().is_none());
        session.select(Aesthetic::Color, Some(Column::Wt)).unwrap();
        session.select(Aesthetic::Size, Some(Column::Am)).unwrap();

        // qsec has too many distinct values for the shape palette
        session.select(Aesthetic::Shape, Some(Column::Qsec)).unwrap();
        assert!(session.plot().is_some());
        assert!(session.error().is_none());
        assert!(session.warning().is_some());

        session.select(Aesthetic::Shape, Some(Column::Gear)).unwrap();
        assert!(session.plot().is_some());
        assert!(session.error().is_none());
        assert!(session.warning().is_none());
    }

    #[test]
    fn test_reset() {
        let mut session = session();
        fill(
            &mut session,
            [Column::Mpg, Column::Hp, Column::Wt, Column::Am, Column::Gear],
        );
        session.reset().unwrap();
        assert!(session.assignment().is_empty());
        assert!(session.plot().is_none());
        assert!(session.warning().is_none());
        assert_eq!(session.controls(), Session::new(mtcars().unwrap()).controls());
    }

    #[test]
    fn test_reset_clears_render_error() {
        let mut data = mtcars().unwrap();
        let hp: Vec<String> = (0..32).map(|i| format!("hp{}", i)).collect();
        data.replace("hp", Series::new("hp".into(), hp)).unwrap();
        let mut session = Session::new(data);
        fill(
            &mut session,
            [Column::Mpg, Column::Hp, Column::Wt, Column::Am, Column::Gear],
        );
        assert!(session.error().is_some());

        session.apply(Event::Reset).unwrap();
        assert!(session.assignment().is_empty());
        assert!(session.error().is_none());
    }
}
