//! Angle node: the host that owns the authoritative parameters
//!
//! The manipulator and the frontend only propose `AngleUpdate`s; the node is
//! the single writer. After every change it stores the freshly composed
//! prompt as node data, ready to be concatenated into a generation request.

use super::compose::{compose_prompt, ClassificationResult};
use super::params::{AngleParameters, AngleUpdate};

#[derive(Debug, Clone)]
pub struct AngleNode {
    parameters: AngleParameters,
    angle_prompt: String,
}

impl Default for AngleNode {
    fn default() -> Self {
        Self::new(AngleParameters::default())
    }
}

impl AngleNode {
    /// Create a node from (possibly restored) parameters
    pub fn new(parameters: AngleParameters) -> Self {
        let parameters = parameters.normalized();
        let angle_prompt = compose_prompt(&parameters).composed_prompt;
        Self {
            parameters,
            angle_prompt,
        }
    }

    pub fn parameters(&self) -> AngleParameters {
        self.parameters
    }

    /// Prompt fragment stored with the node data
    pub fn angle_prompt(&self) -> &str {
        &self.angle_prompt
    }

    /// Current classification, computed on demand
    pub fn classification(&self) -> ClassificationResult {
        compose_prompt(&self.parameters)
    }

    /// Apply a proposed update and recompose the prompt immediately
    pub fn apply(&mut self, update: &AngleUpdate) -> ClassificationResult {
        self.parameters = self.parameters.apply(update);
        self.commit()
    }

    /// Restore default angles (0, 0, 5), keeping the vocabulary choice
    pub fn reset(&mut self) -> ClassificationResult {
        self.parameters = self.parameters.reset();
        self.commit()
    }

    fn commit(&mut self) -> ClassificationResult {
        let result = compose_prompt(&self.parameters);
        self.angle_prompt.clone_from(&result.composed_prompt);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_has_default_prompt() {
        let node = AngleNode::default();
        assert_eq!(
            node.angle_prompt(),
            "front view, eye level, medium shot (horizontal: 0, vertical: 0, zoom: 5.0)"
        );
    }

    #[test]
    fn test_apply_updates_prompt_synchronously() {
        let mut node = AngleNode::default();
        let result = node.apply(&AngleUpdate::horizontal(180.0));
        assert_eq!(result.horizontal_label, "back view");
        assert_eq!(node.angle_prompt(), result.composed_prompt);
        assert_eq!(node.parameters().horizontal_angle, 180.0);
    }

    #[test]
    fn test_verbose_toggle_switches_format() {
        let mut node = AngleNode::default();
        node.apply(&AngleUpdate::verbose(false));
        assert_eq!(node.angle_prompt(), "front view eye-level shot medium shot");
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut node = AngleNode::new(AngleParameters::new(300.0, 70.0, 9.0, true));
        node.reset();
        assert_eq!(node.parameters(), AngleParameters::default());
        assert_eq!(node.classification().distance_label, "medium shot");
    }

    #[test]
    fn test_restored_parameters_are_normalized() {
        let restored = AngleParameters {
            horizontal_angle: 450.0,
            vertical_angle: 200.0,
            zoom_level: 12.0,
            verbose_mode: true,
        };
        let node = AngleNode::new(restored);
        assert_eq!(node.parameters().horizontal_angle, 90.0);
        assert_eq!(node.parameters().vertical_angle, 90.0);
        assert_eq!(node.parameters().zoom_level, 10.0);
    }
}
