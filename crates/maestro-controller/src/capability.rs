use std::fmt;

use maestro_protocol::{
    GET_ERRORS, GO_HOME, RESTART_SCRIPT, RESTART_SCRIPT_WITH_PARAMETER, SET_MULTIPLE_TARGETS,
    SET_PWM,
};

/// Board features that exist in the protocol but are not driven here.
///
/// Calls for these return
/// [`ControllerError::NotImplemented`](crate::ControllerError::NotImplemented)
/// and never touch the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    GoHome,
    RestartScript,
    RestartScriptWithParameters,
    GetErrors,
    SetPwm,
    SetMultiTarget,
}

impl Capability {
    /// Every capability, in opcode order.
    pub const ALL: [Capability; 6] = [
        Capability::SetPwm,
        Capability::SetMultiTarget,
        Capability::GetErrors,
        Capability::GoHome,
        Capability::RestartScript,
        Capability::RestartScriptWithParameters,
    ];

    /// The opcode the board assigns to this feature.
    pub fn opcode(self) -> u8 {
        match self {
            Capability::GoHome => GO_HOME,
            Capability::RestartScript => RESTART_SCRIPT,
            Capability::RestartScriptWithParameters => RESTART_SCRIPT_WITH_PARAMETER,
            Capability::GetErrors => GET_ERRORS,
            Capability::SetPwm => SET_PWM,
            Capability::SetMultiTarget => SET_MULTIPLE_TARGETS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Capability::GoHome => "go_home",
            Capability::RestartScript => "restart_script",
            Capability::RestartScriptWithParameters => "restart_script_with_parameters",
            Capability::GetErrors => "get_errors",
            Capability::SetPwm => "set_pwm",
            Capability::SetMultiTarget => "set_multi_target",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcodes_are_distinct() {
        let mut opcodes: Vec<u8> = Capability::ALL.iter().map(|c| c.opcode()).collect();
        opcodes.sort_unstable();
        opcodes.dedup();
        assert_eq!(opcodes.len(), Capability::ALL.len());
    }

    #[test]
    fn display_uses_method_name() {
        assert_eq!(Capability::GoHome.to_string(), "go_home");
        assert_eq!(Capability::SetMultiTarget.to_string(), "set_multi_target");
    }
}
