//! Print workflow state machine for the owner dashboard.
//!
//! One file at a time moves through fetch, hidden-frame render, the
//! platform print dialog, and an asynchronous operator confirmation.
//! The machine refuses to start a second job while one is in flight,
//! so a rapid double-click issues a single request.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintJob {
    pub file_id: u64,
    pub file_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrintStage {
    #[default]
    Idle,
    FetchingBinary,
    BinaryFetched,
    DialogOpen,
    AwaitingConfirmation,
    Deleting,
    Deleted,
    Declined,
}

/// What the driver should do after the operator answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// "Yes, it printed": request server-side deletion, then reload.
    Delete,
    /// "No": leave the file on the server, surface a message.
    Keep,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrintFlow {
    stage: PrintStage,
    job: Option<PrintJob>,
}

impl PrintFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> PrintStage {
        self.stage
    }

    pub fn job(&self) -> Option<&PrintJob> {
        self.job.as_ref()
    }

    /// True while a job is between `begin` and its outcome.
    pub fn is_busy(&self) -> bool {
        matches!(
            self.stage,
            PrintStage::FetchingBinary
                | PrintStage::BinaryFetched
                | PrintStage::DialogOpen
                | PrintStage::AwaitingConfirmation
                | PrintStage::Deleting
        )
    }

    /// Starts a job. Rejected while another job is in flight.
    pub fn begin(&mut self, file_id: u64, file_name: &str) -> bool {
        if self.is_busy() {
            return false;
        }
        self.job = Some(PrintJob {
            file_id,
            file_name: file_name.to_string(),
        });
        self.stage = PrintStage::FetchingBinary;
        true
    }

    pub fn binary_fetched(&mut self) -> bool {
        self.advance(PrintStage::FetchingBinary, PrintStage::BinaryFetched)
    }

    pub fn dialog_opened(&mut self) -> bool {
        self.advance(PrintStage::BinaryFetched, PrintStage::DialogOpen)
    }

    pub fn await_confirmation(&mut self) -> bool {
        self.advance(PrintStage::DialogOpen, PrintStage::AwaitingConfirmation)
    }

    /// Records the operator's answer. `None` when no job is waiting.
    pub fn confirm(&mut self, printed: bool) -> Option<Confirmation> {
        if self.stage != PrintStage::AwaitingConfirmation {
            return None;
        }
        if printed {
            self.stage = PrintStage::Deleting;
            Some(Confirmation::Delete)
        } else {
            self.stage = PrintStage::Declined;
            Some(Confirmation::Keep)
        }
    }

    pub fn deleted(&mut self) -> bool {
        self.advance(PrintStage::Deleting, PrintStage::Deleted)
    }

    /// Abandons the current job (fetch failure, dialog failure, or the
    /// caller finishing a terminal stage).
    pub fn reset(&mut self) {
        self.stage = PrintStage::Idle;
        self.job = None;
    }

    fn advance(&mut self, from: PrintStage, to: PrintStage) -> bool {
        if self.stage == from {
            self.stage = to;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow_at_confirmation() -> PrintFlow {
        let mut flow = PrintFlow::new();
        assert!(flow.begin(7, "essay.pdf"));
        assert!(flow.binary_fetched());
        assert!(flow.dialog_opened());
        assert!(flow.await_confirmation());
        flow
    }

    #[test]
    fn confirmed_print_deletes_then_finishes() {
        let mut flow = flow_at_confirmation();
        assert_eq!(flow.confirm(true), Some(Confirmation::Delete));
        assert_eq!(flow.stage(), PrintStage::Deleting);
        assert!(flow.deleted());
        assert_eq!(flow.stage(), PrintStage::Deleted);
        assert!(!flow.is_busy());
    }

    #[test]
    fn declined_print_keeps_the_file() {
        let mut flow = flow_at_confirmation();
        assert_eq!(flow.confirm(false), Some(Confirmation::Keep));
        assert_eq!(flow.stage(), PrintStage::Declined);
        // no delete step is reachable from Declined
        assert!(!flow.deleted());
    }

    #[test]
    fn double_begin_is_rejected_while_busy() {
        let mut flow = PrintFlow::new();
        assert!(flow.begin(1, "a.pdf"));
        assert!(!flow.begin(2, "b.pdf"));
        assert_eq!(flow.job().unwrap().file_id, 1);

        let mut flow = flow_at_confirmation();
        assert!(!flow.begin(2, "b.pdf"));
        assert_eq!(flow.stage(), PrintStage::AwaitingConfirmation);
    }

    #[test]
    fn begin_is_allowed_again_after_terminal_stage() {
        let mut flow = flow_at_confirmation();
        flow.confirm(false);
        flow.reset();
        assert!(flow.begin(2, "b.pdf"));
        assert_eq!(flow.job().unwrap().file_id, 2);
    }

    #[test]
    fn out_of_order_transitions_are_no_ops() {
        let mut flow = PrintFlow::new();
        assert!(!flow.binary_fetched());
        assert!(!flow.await_confirmation());
        assert_eq!(flow.confirm(true), None);
        assert_eq!(flow.stage(), PrintStage::Idle);
    }

    #[test]
    fn reset_clears_the_job() {
        let mut flow = PrintFlow::new();
        flow.begin(3, "c.pdf");
        flow.reset();
        assert_eq!(flow.stage(), PrintStage::Idle);
        assert!(flow.job().is_none());
    }
}
