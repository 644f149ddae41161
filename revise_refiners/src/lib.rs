mod annotate;
mod command;

pub use annotate::{AnnotationOptions, AnnotationRefiner};
pub use command::{CommandRefiner, CommandSpec};

use revise_refiner_api::RefinerRegistry;

/// Build a refiner registry populated with Revise's default refiners.
///
/// The command refiner is added when `REVISE_REFINER_CMD` is set.
#[must_use]
pub fn default_registry() -> RefinerRegistry {
    registry_with(CommandRefiner::from_env())
}

fn registry_with(command: Option<CommandRefiner>) -> RefinerRegistry {
    let mut registry = RefinerRegistry::new();
    registry.register(AnnotationRefiner::default());

    if let Some(command) = command {
        registry.register(command);
    }

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use revise_refiner_api::Refiner;

    fn ids(registry: &RefinerRegistry) -> Vec<String> {
        registry.summaries().into_iter().map(|s| s.id).collect()
    }

    #[test]
    fn annotation_is_always_registered() {
        assert_eq!(ids(&registry_with(None)), ["annotate"]);
    }

    #[test]
    fn configured_command_is_registered() {
        let spec = CommandSpec::from_settings("fmt -w 80", Some("10")).expect("command configured");
        let registry = registry_with(Some(CommandRefiner::new(spec)));

        assert_eq!(ids(&registry), ["annotate", "command"]);
        let command = registry.get("command").expect("command refiner");
        assert_eq!(command.label(), "External command");
    }
}
