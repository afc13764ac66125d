/// Clean-exit handshake between the shell and the main window content.
///
/// The shell never exits while the content may still need to persist its
/// state: the first quit request is vetoed and turned into a `quit`
/// notification, and only the content's acknowledgement lets later exit
/// requests through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum LifecycleState {
    #[default]
    Running,
    CleanExitRequested,
    ReadyToQuit,
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum QuitDecision {
    /// Veto the exit and notify the content that shutdown is starting.
    StartCleanExit,
    /// Handshake already in flight; veto without notifying again.
    Veto,
    Allow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AckDecision {
    Accepted,
    IgnoredForeignSender,
    IgnoredNotQuitting,
}

impl LifecycleState {
    pub(crate) fn request_quit(&mut self) -> QuitDecision {
        match self {
            Self::Running => {
                *self = Self::CleanExitRequested;
                QuitDecision::StartCleanExit
            }
            Self::CleanExitRequested => QuitDecision::Veto,
            Self::ReadyToQuit | Self::Terminated => QuitDecision::Allow,
        }
    }

    pub(crate) fn acknowledge(&mut self, sender_label: &str, main_label: &str) -> AckDecision {
        if sender_label != main_label {
            return AckDecision::IgnoredForeignSender;
        }
        if *self != Self::CleanExitRequested {
            return AckDecision::IgnoredNotQuitting;
        }

        *self = Self::ReadyToQuit;
        AckDecision::Accepted
    }

    /// Completes the handshake without an acknowledgement. Used when no
    /// content is left that could answer the `quit` notification.
    pub(crate) fn force_ready(&mut self) -> bool {
        if *self != Self::CleanExitRequested {
            return false;
        }
        *self = Self::ReadyToQuit;
        true
    }

    pub(crate) fn mark_terminated(&mut self) {
        *self = Self::Terminated;
    }

    pub(crate) fn is_quitting(&self) -> bool {
        *self != Self::Running
    }

    pub(crate) fn is_ready_to_quit(&self) -> bool {
        matches!(self, Self::ReadyToQuit | Self::Terminated)
    }
}
