use parlor_types::AgentState;

/// Label of the button that starts a session.
pub const START_CONVERSATION_LABEL: &str = "Start a conversation";

/// Banner shown while the agent is talking.
pub const SPEAKING_BANNER: &str = "Assistant is speaking...";

/// Returns the banner for `state`, if one is shown.
pub fn banner_for(state: AgentState) -> Option<&'static str> {
    (state == AgentState::Speaking).then_some(SPEAKING_BANNER)
}

/// What the control bar shows for a given agent state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAffordance {
    /// Single "start a conversation" action.
    StartConversation,
    /// Nothing while the room connection is being set up.
    Hidden,
    /// Microphone/device controls plus a disconnect button.
    SessionControls,
}

impl ControlAffordance {
    pub fn for_state(state: AgentState) -> Self {
        match state {
            AgentState::Disconnected => Self::StartConversation,
            AgentState::Connecting => Self::Hidden,
            _ => Self::SessionControls,
        }
    }

    pub fn can_connect(self) -> bool {
        self == Self::StartConversation
    }

    pub fn can_disconnect(self) -> bool {
        self == Self::SessionControls
    }
}
