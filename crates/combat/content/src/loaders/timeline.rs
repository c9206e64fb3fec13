//! Timeline loader.
//!
//! Timeline files store actions as flat [`ActionSpec`] records. Conversion
//! into typed actions happens here, so an unknown action type or a missing
//! field is reported with its step and action index before anything runs.

use std::path::Path;

use combat_core::{Action, ActionSpec, Step, Timeline};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepSpec {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    pub actions: Vec<ActionSpec>,
}

/// Timeline structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineSpec {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub build_id: String,
    pub steps: Vec<StepSpec>,
}

impl TryFrom<TimelineSpec> for Timeline {
    type Error = anyhow::Error;

    fn try_from(spec: TimelineSpec) -> Result<Self, Self::Error> {
        let mut steps = Vec::with_capacity(spec.steps.len());
        for (step_index, step) in spec.steps.into_iter().enumerate() {
            let mut actions = Vec::with_capacity(step.actions.len());
            for (action_index, action) in step.actions.into_iter().enumerate() {
                let action = Action::try_from(action).map_err(|e| {
                    anyhow::anyhow!(
                        "Invalid action {} in step {} ({}): {}",
                        action_index,
                        step_index,
                        step.id,
                        e
                    )
                })?;
                actions.push(action);
            }
            steps.push(Step {
                id: step.id,
                description: step.description,
                actions,
            });
        }

        Ok(Timeline {
            id: spec.id,
            name: spec.name,
            build_id: spec.build_id,
            steps,
        })
    }
}

/// Loader for timelines from RON files.
pub struct TimelineLoader;

impl TimelineLoader {
    pub fn load(path: &Path) -> LoadResult<Timeline> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Timeline> {
        let spec: TimelineSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse timeline RON: {}", e))?;
        Timeline::try_from(spec)
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{Facing, Position};

    use super::*;

    #[test]
    fn parses_every_action_kind() {
        let content = r#"
            (
                id: "mixed",
                steps: [
                    (
                        id: "one",
                        actions: [
                            (type: "CastSpell", spell_id: Some("XEL_DIAL"), target_position: Some((x: 7, y: 6))),
                            (type: "Move", target_position: Some((x: 6, y: 7))),
                        ],
                    ),
                    (
                        id: "two",
                        description: Some("swap and turn"),
                        actions: [
                            (type: "Transpose", target_position: Some((x: 7, y: 6))),
                            (type: "ChangeFacing", facing: Some(back)),
                        ],
                    ),
                ],
            )
        "#;

        let timeline = TimelineLoader::parse(content).expect("timeline parses");

        assert_eq!(timeline.len(), 2);
        assert_eq!(
            timeline.steps[0].actions,
            vec![
                Action::cast_spell("XEL_DIAL", Position::new(7, 6)),
                Action::move_to(Position::new(6, 7)),
            ]
        );
        assert_eq!(
            timeline.steps[1].actions,
            vec![
                Action::transpose(Position::new(7, 6)),
                Action::change_facing(Facing::Back),
            ]
        );
        assert_eq!(timeline.steps[1].description.as_deref(), Some("swap and turn"));
    }

    #[test]
    fn unknown_action_type_names_its_location() {
        let content = r#"
            (
                id: "bad",
                steps: [
                    (id: "only", actions: [(type: "TriggerMechanism")]),
                ],
            )
        "#;

        let err = TimelineLoader::parse(content).expect_err("unknown type is rejected");
        let message = err.to_string();
        assert!(message.contains("step 0 (only)"), "{message}");
        assert!(message.contains("unknown action type: TriggerMechanism"), "{message}");
    }
}
