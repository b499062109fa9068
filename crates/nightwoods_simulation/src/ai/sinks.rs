//! Output sinks: audio one-shot + visibility флаг static-эффекта
//!
//! Core только вызывает эти trait'ы; ECS слой превращает вызовы в Bevy events.

/// "Проиграй этот clip один раз"
pub trait AudioSink {
    fn play_once(&mut self, clip: &str);
}

/// Видимость/активация proximity эффекта
pub trait VisibilitySink {
    fn set_effect_active(&mut self, active: bool);
}

/// Sink, который ничего не делает
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn play_once(&mut self, _clip: &str) {}
}

impl VisibilitySink for NullSink {
    fn set_effect_active(&mut self, _active: bool) {}
}

/// Записывает все вызовы (тесты, headless отчёты)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSink {
    pub sounds: Vec<String>,
    pub effect_toggles: Vec<bool>,
}

impl AudioSink for RecordingSink {
    fn play_once(&mut self, clip: &str) {
        self.sounds.push(clip.to_string());
    }
}

impl VisibilitySink for RecordingSink {
    fn set_effect_active(&mut self, active: bool) {
        self.effect_toggles.push(active);
    }
}
