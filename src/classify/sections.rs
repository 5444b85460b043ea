//! Sections opened by a heading, such as the abstract or the references.

use super::RoleModule;
use crate::model::{Document, Role, TextBlock};

/// Whether the scan is inside a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionState {
    /// Before the opening heading, or after a heading that closed it
    #[default]
    Outside,
    /// Between the opening heading and the next heading
    Inside,
}

/// What the scan sees next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionEvent {
    /// A heading that opens the section
    MatchingHeading,
    /// Any other heading
    OtherHeading,
    /// A non-heading block
    Block,
}

impl SectionState {
    /// State after `event`.
    pub fn next(self, event: SectionEvent) -> Self {
        match event {
            SectionEvent::MatchingHeading => SectionState::Inside,
            SectionEvent::OtherHeading => SectionState::Outside,
            SectionEvent::Block => self,
        }
    }
}

/// Labels the unassigned blocks between a heading whose secondary role is
/// `role` and the next heading.
#[derive(Debug, Clone, Copy)]
pub struct SectionModule {
    name: &'static str,
    role: Role,
}

impl SectionModule {
    /// Create a module named `name` that stamps `role` inside the section.
    pub fn new(name: &'static str, role: Role) -> Self {
        Self { name, role }
    }

    /// The section role stamped on the blocks.
    pub fn role(&self) -> Role {
        self.role
    }

    fn event(&self, block: &TextBlock) -> SectionEvent {
        match block.role() {
            Some(Role::Heading) if block.secondary_role() == Some(self.role) => {
                SectionEvent::MatchingHeading
            }
            Some(Role::Heading) => SectionEvent::OtherHeading,
            _ => SectionEvent::Block,
        }
    }
}

impl RoleModule for SectionModule {
    fn name(&self) -> &'static str {
        self.name
    }

    fn run(&self, document: &Document) {
        let mut state = SectionState::Outside;
        let mut labeled = 0usize;
        for (_, block) in document.blocks() {
            let event = self.event(block);
            state = state.next(event);
            let inside = state == SectionState::Inside;
            if event == SectionEvent::Block && inside && block.set_role(self.role) {
                labeled += 1;
            }
        }
        if labeled > 0 {
            log::debug!("Section {}: {} blocks", self.name, labeled);
        }
    }
}
