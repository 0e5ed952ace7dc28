use crate::message::{CanvasId, CanvasSnapshot, StrokePayload, TextAreaPayload};

/// One drawable surface.
///
/// Strokes only ever accumulate at the tail; past entries are never reordered
/// or rewritten. The text-area set is the current full set and is replaced
/// wholesale on every update.
#[derive(Debug, Clone, Default)]
pub struct CanvasState {
    strokes: Vec<StrokePayload>,
    text_areas: Vec<TextAreaPayload>,
}

impl CanvasState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stroke. With `Some(cap)`, the oldest strokes are evicted
    /// first so at most `cap` remain; `None` keeps the full history.
    pub fn append_stroke(&mut self, stroke: StrokePayload, cap: Option<usize>) {
        if let Some(cap) = cap {
            if cap == 0 {
                return;
            }
            while self.strokes.len() >= cap {
                self.strokes.remove(0);
            }
        }
        self.strokes.push(stroke);
    }

    /// Last writer wins; there is no merge.
    pub fn replace_text_areas(&mut self, text_areas: Vec<TextAreaPayload>) {
        self.text_areas = text_areas;
    }

    /// Empties the content. The canvas entry itself stays.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.text_areas.clear();
    }

    pub fn strokes(&self) -> &[StrokePayload] {
        &self.strokes
    }

    pub fn text_areas(&self) -> &[TextAreaPayload] {
        &self.text_areas
    }

    pub fn snapshot(&self, id: &CanvasId) -> CanvasSnapshot {
        CanvasSnapshot {
            id: id.clone(),
            drawings: self.strokes.clone(),
            text_areas: self.text_areas.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn it_appends_strokes_in_order() {
        let mut canvas = CanvasState::new();
        canvas.append_stroke(json!(1), None);
        canvas.append_stroke(json!(2), None);
        assert_eq!(canvas.strokes(), &[json!(1), json!(2)]);
    }

    #[test]
    fn it_evicts_oldest_stroke_at_cap() {
        let mut canvas = CanvasState::new();
        for n in 0..4 {
            canvas.append_stroke(json!(n), Some(2));
        }
        assert_eq!(canvas.strokes(), &[json!(2), json!(3)]);
    }

    #[test]
    fn it_replaces_text_areas_wholesale() {
        let mut canvas = CanvasState::new();
        canvas.replace_text_areas(vec![json!("t1")]);
        canvas.replace_text_areas(vec![json!("t2"), json!("t3")]);
        assert_eq!(canvas.text_areas(), &[json!("t2"), json!("t3")]);
    }

    #[test]
    fn it_clears_content_only() {
        let mut canvas = CanvasState::new();
        canvas.append_stroke(json!("s"), None);
        canvas.replace_text_areas(vec![json!("t")]);
        canvas.clear();
        assert!(canvas.strokes().is_empty());
        assert!(canvas.text_areas().is_empty());
    }
}
