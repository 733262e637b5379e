//! Configuration validation
//!
//! Rules:
//! - file_writer app_id non-empty
//! - file_writer queue_capacity > 0
//! - crash prefix non-empty

use contracts::{PipelineBlueprint, PipelineError, SinkSpec};

/// Validate a pipeline blueprint
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(blueprint: &PipelineBlueprint) -> Result<(), PipelineError> {
    for (idx, sink) in blueprint.sinks.iter().enumerate() {
        validate_sink(idx, sink)?;
    }
    Ok(())
}

fn validate_sink(idx: usize, sink: &SinkSpec) -> Result<(), PipelineError> {
    match sink {
        SinkSpec::Console { .. } => Ok(()),
        SinkSpec::Crash { prefix } => {
            if prefix.is_empty() {
                return Err(PipelineError::config_validation(
                    format!("sinks[{idx}].prefix"),
                    "crash prefix cannot be empty, every message would match",
                ));
            }
            Ok(())
        }
        SinkSpec::FileWriter {
            app_id,
            queue_capacity,
            ..
        } => {
            if app_id.is_empty() {
                return Err(PipelineError::config_validation(
                    format!("sinks[{idx}].app_id"),
                    "app_id cannot be empty",
                ));
            }
            if *queue_capacity == 0 {
                return Err(PipelineError::config_validation(
                    format!("sinks[{idx}].queue_capacity"),
                    "queue_capacity must be > 0",
                ));
            }
            Ok(())
        }
        SinkSpec::Haptic { pulse_ms, .. } => {
            if *pulse_ms == 0 {
                return Err(PipelineError::config_validation(
                    format!("sinks[{idx}].pulse_ms"),
                    "pulse_ms must be > 0",
                ));
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blueprint_with(sink: SinkSpec) -> PipelineBlueprint {
        PipelineBlueprint {
            default_filter: Vec::new(),
            sinks: vec![sink],
        }
    }

    #[test]
    fn test_valid_blueprint_passes() {
        let blueprint = blueprint_with(SinkSpec::FileWriter {
            directory: None,
            prefer_external: false,
            external_dir: None,
            app_id: "demo".to_string(),
            queue_capacity: 8,
            filter: None,
        });
        assert!(validate(&blueprint).is_ok());
    }

    #[test]
    fn test_empty_app_id_rejected() {
        let blueprint = blueprint_with(SinkSpec::FileWriter {
            directory: None,
            prefer_external: false,
            external_dir: None,
            app_id: String::new(),
            queue_capacity: 8,
            filter: None,
        });
        let err = validate(&blueprint).unwrap_err();
        assert!(matches!(err, PipelineError::ConfigValidation { .. }));
    }

    #[test]
    fn test_zero_queue_capacity_rejected() {
        let blueprint = blueprint_with(SinkSpec::FileWriter {
            directory: None,
            prefer_external: false,
            external_dir: None,
            app_id: "demo".to_string(),
            queue_capacity: 0,
            filter: None,
        });
        assert!(validate(&blueprint).is_err());
    }

    #[test]
    fn test_empty_crash_prefix_rejected() {
        let blueprint = blueprint_with(SinkSpec::Crash {
            prefix: String::new(),
        });
        assert!(validate(&blueprint).is_err());
    }

    #[test]
    fn test_duplicate_sinks_are_permitted() {
        let blueprint = PipelineBlueprint {
            default_filter: Vec::new(),
            sinks: vec![
                SinkSpec::Console { filter: None },
                SinkSpec::Console { filter: None },
            ],
        };
        assert!(validate(&blueprint).is_ok());
    }
}
