//! Label and temporary name allocation, and label resolution.
//!
//! Labels are minted as `L<n>` while parsing, but their real identity is a
//! quadruple position that is usually not known yet when the first branch
//! against them is emitted. Each label therefore carries either a resolved
//! target or a patch-list of quadruple positions waiting for one; defining
//! the label drains the list through [`QuadBuffer::patch`].

use minic_ir::{QuadBuffer, QuadError};
use rustc_hash::FxHashMap;

/// Allocator for fresh temporary names `t0`, `t1`, ...
#[derive(Debug, Default)]
pub struct Temps {
    next: u32,
}

impl Temps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints a fresh temporary name.
    pub fn fresh(&mut self) -> String {
        let name = format!("t{}", self.next);
        self.next += 1;
        name
    }
}

#[derive(Debug, Default)]
struct LabelState {
    /// Resolved quadruple position, once known.
    target: Option<usize>,
    /// Positions of branch quadruples still holding the label's name.
    pending: Vec<usize>,
}

/// Allocator and resolver for jump labels `L0`, `L1`, ...
#[derive(Debug, Default)]
pub struct Labels {
    next: u32,
    states: FxHashMap<String, LabelState>,
}

impl Labels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints a fresh label name.
    pub fn fresh(&mut self) -> String {
        let name = format!("L{}", self.next);
        self.next += 1;
        name
    }

    /// Records that the quadruple at `pos` was emitted with `label` in its
    /// result slot. If the label is already resolved the quadruple is
    /// patched immediately; otherwise the position joins the patch-list.
    pub fn attach(
        &mut self,
        label: &str,
        pos: usize,
        quads: &mut QuadBuffer,
    ) -> Result<(), QuadError> {
        let state = self.states.entry(label.to_string()).or_default();
        match state.target {
            Some(target) => quads.patch(pos, target),
            None => {
                state.pending.push(pos);
                Ok(())
            }
        }
    }

    /// Resolves `label` to `target`, patching every waiting quadruple.
    pub fn define(
        &mut self,
        label: &str,
        target: usize,
        quads: &mut QuadBuffer,
    ) -> Result<(), QuadError> {
        let state = self.states.entry(label.to_string()).or_default();
        state.target = Some(target);
        for pos in state.pending.drain(..) {
            quads.patch(pos, target)?;
        }
        Ok(())
    }

    /// Returns true if no minted label is still waiting for a target.
    pub fn all_resolved(&self) -> bool {
        self.states.values().all(|state| state.pending.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minic_ir::{Quad, QuadOp};

    #[test]
    fn test_fresh_names_are_distinct() {
        let mut temps = Temps::new();
        assert_eq!(temps.fresh(), "t0");
        assert_eq!(temps.fresh(), "t1");

        let mut labels = Labels::new();
        assert_eq!(labels.fresh(), "L0");
        assert_eq!(labels.fresh(), "L1");
    }

    #[test]
    fn test_define_patches_pending() {
        let mut labels = Labels::new();
        let mut quads = QuadBuffer::new();

        let label = labels.fresh();
        let pos = quads.emit(Quad::new(QuadOp::Jmp, "", "", &label)).unwrap();
        labels.attach(&label, pos, &mut quads).unwrap();
        assert!(!labels.all_resolved());

        labels.define(&label, 7, &mut quads).unwrap();
        assert_eq!(quads.get(pos).unwrap().result, "7");
        assert!(labels.all_resolved());
    }

    #[test]
    fn test_attach_after_define_patches_immediately() {
        let mut labels = Labels::new();
        let mut quads = QuadBuffer::new();

        let label = labels.fresh();
        labels.define(&label, 0, &mut quads).unwrap();

        let pos = quads.emit(Quad::new(QuadOp::Jmp, "", "", &label)).unwrap();
        labels.attach(&label, pos, &mut quads).unwrap();
        assert_eq!(quads.get(pos).unwrap().result, "0");
        assert!(labels.all_resolved());
    }

    #[test]
    fn test_multiple_uses_of_one_label() {
        let mut labels = Labels::new();
        let mut quads = QuadBuffer::new();

        let label = labels.fresh();
        for _ in 0..3 {
            let pos = quads.emit(Quad::new(QuadOp::Jmp, "", "", &label)).unwrap();
            labels.attach(&label, pos, &mut quads).unwrap();
        }

        labels.define(&label, 9, &mut quads).unwrap();
        assert!(quads.iter().all(|q| q.result == "9"));
    }
}
