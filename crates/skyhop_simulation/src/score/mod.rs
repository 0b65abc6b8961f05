//! Score tracker
//!
//! Один счёт на процесс (Resource). Текст для UI пересобирается сразу
//! при каждом изменении, host только рендерит `Scoreboard::text()`.

use bevy::prelude::*;

/// Event: счёт изменился (UI, звук)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ScoreChanged {
    pub score: i64,
    pub delta: i64,
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Scoreboard {
    score: i64,
    text: String,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self {
            score: 0,
            text: render_score(0),
        }
    }
}

impl Scoreboard {
    /// Добавить очки. Всегда успешно (насыщение на границах i64), текст обновляется немедленно.
    pub fn add_score(&mut self, amount: i64) -> ScoreChanged {
        self.score = self.score.saturating_add(amount);
        self.text = render_score(self.score);

        ScoreChanged {
            score: self.score,
            delta: amount,
        }
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

fn render_score(score: i64) -> String {
    format!("Score: {}", score)
}

pub struct ScorePlugin;

impl Plugin for ScorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Scoreboard>().add_event::<ScoreChanged>();
    }
}
