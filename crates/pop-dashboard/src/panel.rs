//! Slide-in form panel
//!
//! Every form opens as a side panel over its list. Visibility is a small
//! state machine driven by CSS transition-end events rather than timers:
//!
//! ```text
//! Closed -> Opening -> Open -> Closing -> Closed
//! ```
//!
//! The panel navigates back to the list route only once the closing
//! transition has actually finished.

use leptos::*;

use crate::components::icons::ArrowLeftIcon;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelPhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl PanelPhase {
    /// Open request; only a closed panel starts the entry transition.
    pub fn on_open(self) -> Self {
        match self {
            PanelPhase::Closed => PanelPhase::Opening,
            other => other,
        }
    }

    /// Close request; mid-entry panels reverse immediately.
    pub fn on_close(self) -> Self {
        match self {
            PanelPhase::Opening | PanelPhase::Open => PanelPhase::Closing,
            other => other,
        }
    }

    /// The CSS transition finished.
    pub fn on_transition_end(self) -> Self {
        match self {
            PanelPhase::Opening => PanelPhase::Open,
            PanelPhase::Closing => PanelPhase::Closed,
            other => other,
        }
    }

    /// Whether the panel renders in its on-screen position; toggling this
    /// class is what runs the CSS transition.
    pub fn is_shown(self) -> bool {
        matches!(self, PanelPhase::Opening | PanelPhase::Open)
    }
}

/// Handle forms use to close their panel after a successful submit.
#[derive(Clone, Copy)]
pub struct PanelController {
    phase: RwSignal<PanelPhase>,
}

impl PanelController {
    pub fn request_close(&self) {
        self.phase.update(|p| *p = p.on_close());
    }
}

fn go_back() {
    if let Ok(history) = window().history() {
        let _ = history.back();
    }
}

/// The slide-in container: backdrop, header with a back button, and the
/// phase machine wiring. Children reach the [`PanelController`] through
/// context to close programmatically.
#[component]
pub fn SlidePanel(title: &'static str, children: Children) -> impl IntoView {
    let phase = create_rw_signal(PanelPhase::Closed);
    let controller = PanelController { phase };
    provide_context(controller);

    // Enter on the frame after mount so the transition has a start state.
    request_animation_frame(move || phase.update(|p| *p = p.on_open()));

    let on_transition_end = move |_| {
        let before = phase.get_untracked();
        let after = before.on_transition_end();
        if before == after {
            return;
        }
        phase.set(after);
        if after == PanelPhase::Closed {
            go_back();
        }
    };

    view! {
        <div class="panel-backdrop" on:click=move |_| controller.request_close()></div>
        <div
            class="panel-wrap"
            class:shown=move || phase.get().is_shown()
            on:transitionend=on_transition_end
        >
            <aside class="panel" role="dialog" aria-label=title>
                <div class="panel-header">
                    <button
                        type="button"
                        class="icon-btn"
                        aria-label="Voltar"
                        on:click=move |_| controller.request_close()
                    >
                        <ArrowLeftIcon/>
                    </button>
                    <h2 class="panel-title">{title}</h2>
                </div>
                {children()}
            </aside>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::PanelPhase::*;

    #[test]
    fn test_full_open_close_cycle() {
        let phase = Closed.on_open();
        assert_eq!(phase, Opening);
        let phase = phase.on_transition_end();
        assert_eq!(phase, Open);
        let phase = phase.on_close();
        assert_eq!(phase, Closing);
        let phase = phase.on_transition_end();
        assert_eq!(phase, Closed);
    }

    #[test]
    fn test_close_during_entry_reverses() {
        assert_eq!(Opening.on_close(), Closing);
    }

    #[test]
    fn test_redundant_events_are_noops() {
        // Transitions report once per animated property; the second event
        // must not advance the machine again.
        assert_eq!(Open.on_transition_end(), Open);
        assert_eq!(Closed.on_transition_end(), Closed);
        assert_eq!(Closed.on_close(), Closed);
        assert_eq!(Open.on_open(), Open);
    }

    #[test]
    fn test_shown_only_while_entering_or_open() {
        assert!(Opening.is_shown());
        assert!(Open.is_shown());
        assert!(!Closing.is_shown());
        assert!(!Closed.is_shown());
    }
}
