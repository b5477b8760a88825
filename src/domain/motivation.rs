use crate::domain::stats::WorkoutStats;
use once_cell::sync::Lazy;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Encouragement,
    Achievement,
    Reminder,
    Celebration,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Encouragement => "encouragement",
            MessageKind::Achievement => "achievement",
            MessageKind::Reminder => "reminder",
            MessageKind::Celebration => "celebration",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotivationalMessage {
    pub message: String,
    pub kind: MessageKind,
    pub emoji: String,
}

/// Totals of a single finished session, reported by the workout flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutCompletionStats {
    pub total_sets: u32,
    pub total_volume: f64,
    pub duration_minutes: u32,
    pub exercises: Vec<String>,
}

/// Longitudinal deltas between the current and previous training window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressDelta {
    pub volume_increase: f64,
    pub strength_increase: f64,
    pub consistency_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageTemplate {
    pub message: String,
    pub emoji: String,
}

/// Message pools per category. Configuration data, not logic: injected at
/// engine construction so tests can substitute their own pools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageCatalog {
    pub encouragement: Vec<MessageTemplate>,
    pub achievement: Vec<MessageTemplate>,
    pub reminder: Vec<MessageTemplate>,
    pub celebration: Vec<MessageTemplate>,
    pub completion: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum MotivationError {
    #[error("message catalog has no {0} entries")]
    EmptyCatalog(&'static str),
}

impl MessageCatalog {
    fn for_kind(&self, kind: MessageKind) -> &[MessageTemplate] {
        match kind {
            MessageKind::Encouragement => &self.encouragement,
            MessageKind::Achievement => &self.achievement,
            MessageKind::Reminder => &self.reminder,
            MessageKind::Celebration => &self.celebration,
        }
    }

    /// Misconfiguration check. Runs once at startup; an empty pool must
    /// never be discovered at selection time.
    pub fn validate(&self) -> Result<(), MotivationError> {
        for kind in [
            MessageKind::Encouragement,
            MessageKind::Achievement,
            MessageKind::Reminder,
            MessageKind::Celebration,
        ] {
            if self.for_kind(kind).is_empty() {
                return Err(MotivationError::EmptyCatalog(kind.as_str()));
            }
        }
        if self.completion.is_empty() {
            return Err(MotivationError::EmptyCatalog("completion"));
        }
        Ok(())
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        DEFAULT_CATALOG.clone()
    }
}

fn templates(pairs: &[(&str, &str)]) -> Vec<MessageTemplate> {
    pairs
        .iter()
        .map(|(message, emoji)| MessageTemplate {
            message: (*message).to_string(),
            emoji: (*emoji).to_string(),
        })
        .collect()
}

static DEFAULT_CATALOG: Lazy<MessageCatalog> = Lazy::new(|| MessageCatalog {
    encouragement: templates(&[
        ("今日も素晴らしいトレーニングを！💪", "💪"),
        ("小さな一歩が大きな変化を生みます 🌟", "🌟"),
        ("継続は力なり！頑張りましょう 🚀", "🚀"),
        ("今日は新しい記録を目指してみませんか？ 📈", "📈"),
        ("あなたの努力は必ず実を結びます 🌱", "🌱"),
        ("一歩ずつ、着実に前進しましょう 👣", "👣"),
        ("今日のトレーニングで、より強くなりましょう 💎", "💎"),
        ("健康な体は最高の投資です 💰", "💰"),
    ]),
    achievement: templates(&[
        ("週の目標を達成しました！おめでとうございます 🎉", "🎉"),
        ("素晴らしい継続力です！👏", "👏"),
        ("目標を超えるパフォーマンスです！🏆", "🏆"),
        ("あなたの努力が実を結んでいます！🌻", "🌻"),
        ("完璧な週でした！🎯", "🎯"),
    ]),
    reminder: templates(&[
        ("週の目標まであと少し！頑張りましょう 💪", "💪"),
        ("目標達成まであと一歩です！🚀", "🚀"),
        ("今週も良いスタートを切りましょう！⭐", "⭐"),
        ("継続が成功の鍵です！🔑", "🔑"),
    ]),
    celebration: templates(&[
        ("新しい記録達成！素晴らしいです！🎊", "🎊"),
        ("連続トレーニング記録更新！🔥", "🔥"),
        ("目標を大幅に上回りました！🌟", "🌟"),
        ("あなたは本当に素晴らしいです！✨", "✨"),
    ]),
    completion: [
        "お疲れ様でした！素晴らしいトレーニングでした！👏",
        "完璧なセッションでした！🎯",
        "今日も一歩前進しました！🚀",
        "継続の力が身についています！💎",
        "あなたの努力が実を結んでいます！🌱",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect(),
});

/// Picks motivational messages from the configured catalog. Stateless
/// apart from the catalog; randomness comes from the caller's `Rng` so
/// selection is reproducible under test.
#[derive(Debug, Clone)]
pub struct MotivationEngine {
    catalog: MessageCatalog,
}

impl MotivationEngine {
    pub fn new(catalog: MessageCatalog) -> Result<Self, MotivationError> {
        catalog.validate()?;
        Ok(Self { catalog })
    }

    /// Dashboard message. Priority ladder: weekly-goal thresholds, then
    /// lifetime milestones, then streaks, then time of day, then a random
    /// encouragement. Weekly thresholds deliberately outrank milestones,
    /// so a first workout that already beats 1.5x the goal gets the
    /// celebration pool, not the first-workout message.
    pub fn generate(
        &self,
        stats: &WorkoutStats,
        local_hour: u32,
        rng: &mut impl Rng,
    ) -> MotivationalMessage {
        let goal = f64::from(stats.weekly_goal.max(1));
        let this_week = f64::from(stats.workouts_this_week);

        if this_week >= goal * 1.5 {
            return self.pick(MessageKind::Celebration, rng);
        }
        if this_week >= goal {
            return self.pick(MessageKind::Achievement, rng);
        }
        if this_week >= goal * 0.7 {
            return self.pick(MessageKind::Reminder, rng);
        }

        match stats.total_workouts {
            1 => {
                return fixed(
                    "初回トレーニングおめでとう！素晴らしいスタートです！🎉",
                    MessageKind::Celebration,
                    "🎉",
                )
            }
            10 => {
                return fixed(
                    "10回目のトレーニング達成！継続の力が身についています！💪",
                    MessageKind::Achievement,
                    "💪",
                )
            }
            50 => {
                return fixed(
                    "50回達成！あなたは真のトレーニーです！🏆",
                    MessageKind::Celebration,
                    "🏆",
                )
            }
            _ => {}
        }

        if stats.streak_days >= 7 {
            return fixed(
                format!("{}日連続！素晴らしい継続力です！🔥", stats.streak_days),
                MessageKind::Achievement,
                "🔥",
            );
        }

        match local_hour {
            5..=11 => fixed(
                "おはようございます！今日も素晴らしい一日を！☀️",
                MessageKind::Encouragement,
                "☀️",
            ),
            12..=17 => fixed(
                "午後のトレーニングでエネルギーをチャージ！⚡",
                MessageKind::Encouragement,
                "⚡",
            ),
            18..=21 => fixed(
                "夕方のトレーニングで一日を締めくくりましょう！🌅",
                MessageKind::Encouragement,
                "🌅",
            ),
            _ => self.pick(MessageKind::Encouragement, rng),
        }
    }

    /// Post-workout message from the finished session's totals.
    pub fn completion_message(
        &self,
        stats: &WorkoutCompletionStats,
        rng: &mut impl Rng,
    ) -> MotivationalMessage {
        if stats.total_volume > 3000.0 {
            return fixed(
                format!(
                    "驚異的な{}kg！あなたは本当に強いです！💪",
                    format_volume(stats.total_volume)
                ),
                MessageKind::Celebration,
                "💪",
            );
        }

        if stats.total_sets > 20 {
            return fixed(
                format!("{}セット完走！素晴らしい持久力です！🏃‍♂️", stats.total_sets),
                MessageKind::Achievement,
                "🏃‍♂️",
            );
        }

        if stats.exercises.len() >= 5 {
            return fixed(
                format!(
                    "{}種目をこなしました！バランスの良いトレーニングです！⚖️",
                    stats.exercises.len()
                ),
                MessageKind::Achievement,
                "⚖️",
            );
        }

        let pool = &self.catalog.completion;
        let message = pool[rng.gen_range(0..pool.len())].clone();
        MotivationalMessage {
            message,
            kind: MessageKind::Achievement,
            emoji: "🎉".to_string(),
        }
    }

    /// Longitudinal progress message. Pure: no random pool involved.
    pub fn progress_message(&self, delta: &ProgressDelta) -> MotivationalMessage {
        if delta.volume_increase > 20.0 || delta.strength_increase > 15.0 {
            return fixed(
                "驚異的な進歩です！あなたの成長は止まりません！📈",
                MessageKind::Celebration,
                "📈",
            );
        }

        if delta.consistency_score > 80.0 {
            return fixed(
                "素晴らしい継続力！習慣化が成功しています！🎯",
                MessageKind::Achievement,
                "🎯",
            );
        }

        if delta.volume_increase > 5.0 || delta.strength_increase > 3.0 {
            return fixed(
                "着実な成長を感じます！この調子で頑張りましょう！🌱",
                MessageKind::Achievement,
                "🌱",
            );
        }

        fixed(
            "毎日の積み重ねが大きな変化を生みます！💪",
            MessageKind::Encouragement,
            "💪",
        )
    }

    fn pick(&self, kind: MessageKind, rng: &mut impl Rng) -> MotivationalMessage {
        let pool = self.catalog.for_kind(kind);
        let template = &pool[rng.gen_range(0..pool.len())];
        MotivationalMessage {
            message: template.message.clone(),
            kind,
            emoji: template.emoji.clone(),
        }
    }
}

fn fixed(message: impl Into<String>, kind: MessageKind, emoji: &str) -> MotivationalMessage {
    MotivationalMessage {
        message: message.into(),
        kind,
        emoji: emoji.to_string(),
    }
}

/// Thousands-grouped rendering for volume interpolation, e.g. 3500 -> "3,500".
/// Keeps a single decimal when the value is fractional.
pub fn format_volume(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    let tenths = (rounded.fract() * 10.0).round() as u32 % 10;
    let digits = (rounded.trunc() as u64).to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if tenths > 0 {
        out.push('.');
        out.push(char::from_digit(tenths, 10).unwrap_or('0'));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn stats(this_week: u32, goal: u32, total: u32, streak: u32) -> WorkoutStats {
        WorkoutStats {
            workouts_this_week: this_week,
            weekly_goal: goal,
            total_workouts: total,
            last_workout_date: None,
            streak_days: streak,
            average_workouts_per_week: 0.0,
        }
    }

    fn engine() -> MotivationEngine {
        MotivationEngine::new(MessageCatalog::default()).unwrap()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn meeting_goal_exactly_is_achievement_not_reminder() {
        let msg = engine().generate(&stats(3, 3, 30, 0), 23, &mut rng());
        assert_eq!(msg.kind, MessageKind::Achievement);
    }

    #[test]
    fn one_and_a_half_times_goal_is_celebration() {
        // ceil(3 * 1.5) = 5
        let msg = engine().generate(&stats(5, 3, 30, 0), 23, &mut rng());
        assert_eq!(msg.kind, MessageKind::Celebration);

        // even goal: 2 * 1.5 = 3 exactly
        let msg = engine().generate(&stats(3, 2, 30, 0), 23, &mut rng());
        assert_eq!(msg.kind, MessageKind::Celebration);
    }

    #[test]
    fn seventy_percent_of_goal_is_reminder() {
        let msg = engine().generate(&stats(7, 10, 30, 0), 23, &mut rng());
        assert_eq!(msg.kind, MessageKind::Reminder);
    }

    #[test]
    fn four_of_three_is_achievement_not_celebration() {
        // 4 >= 3 * 1.5 = 4.5 is false, so this lands one rung below
        let msg = engine().generate(&stats(4, 3, 12, 2), 23, &mut rng());
        assert_eq!(msg.kind, MessageKind::Achievement);
    }

    #[test]
    fn first_workout_gets_the_fixed_message() {
        let msg = engine().generate(&stats(1, 3, 1, 1), 23, &mut rng());
        assert_eq!(msg.kind, MessageKind::Celebration);
        assert!(msg.message.contains("初回トレーニング"));
    }

    #[test]
    fn tenth_and_fiftieth_workouts_are_milestones() {
        let msg = engine().generate(&stats(0, 3, 10, 0), 23, &mut rng());
        assert_eq!(msg.kind, MessageKind::Achievement);
        assert!(msg.message.contains("10回目"));

        let msg = engine().generate(&stats(0, 3, 50, 0), 23, &mut rng());
        assert_eq!(msg.kind, MessageKind::Celebration);
        assert!(msg.message.contains("50回"));
    }

    #[test]
    fn week_long_streak_interpolates_the_day_count() {
        let msg = engine().generate(&stats(0, 3, 30, 9), 23, &mut rng());
        assert_eq!(msg.kind, MessageKind::Achievement);
        assert!(msg.message.contains("9日連続"));
    }

    #[test]
    fn time_of_day_buckets() {
        let e = engine();
        let quiet = stats(0, 3, 30, 0);
        assert!(e.generate(&quiet, 6, &mut rng()).message.contains("おはよう"));
        assert!(e.generate(&quiet, 13, &mut rng()).message.contains("午後"));
        assert!(e.generate(&quiet, 19, &mut rng()).message.contains("夕方"));
        // outside every bucket: falls through to the encouragement pool
        let late = e.generate(&quiet, 23, &mut rng());
        assert_eq!(late.kind, MessageKind::Encouragement);
    }

    #[test]
    fn selection_stays_inside_the_catalog() {
        let e = engine();
        let catalog = MessageCatalog::default();
        let known: HashSet<String> = catalog
            .achievement
            .iter()
            .map(|t| t.message.clone())
            .collect();

        let mut rng = rng();
        let goal_met = stats(3, 3, 30, 0);
        for _ in 0..1000 {
            let msg = e.generate(&goal_met, 23, &mut rng);
            assert!(known.contains(&msg.message));
        }
    }

    #[test]
    fn selection_is_not_constant() {
        let e = engine();
        let mut rng = rng();
        let quiet = stats(0, 3, 30, 0);
        let seen: HashSet<String> = (0..200)
            .map(|_| e.generate(&quiet, 23, &mut rng).message)
            .collect();
        assert!(seen.len() > 1);
    }

    #[test]
    fn seeded_selection_is_reproducible() {
        let e = engine();
        let goal_met = stats(3, 3, 30, 0);
        let a: Vec<String> = {
            let mut rng = StdRng::seed_from_u64(7);
            (0..20).map(|_| e.generate(&goal_met, 23, &mut rng).message).collect()
        };
        let b: Vec<String> = {
            let mut rng = StdRng::seed_from_u64(7);
            (0..20).map(|_| e.generate(&goal_met, 23, &mut rng).message).collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn high_volume_completion_interpolates_grouped_volume() {
        let msg = engine().completion_message(
            &WorkoutCompletionStats {
                total_sets: 10,
                total_volume: 3500.0,
                duration_minutes: 45,
                exercises: vec!["a".into(), "b".into()],
            },
            &mut rng(),
        );
        assert_eq!(msg.kind, MessageKind::Celebration);
        assert!(msg.message.contains("3,500"));
    }

    #[test]
    fn many_sets_completion_message() {
        let msg = engine().completion_message(
            &WorkoutCompletionStats {
                total_sets: 25,
                total_volume: 1000.0,
                duration_minutes: 60,
                exercises: vec!["a".into()],
            },
            &mut rng(),
        );
        assert_eq!(msg.kind, MessageKind::Achievement);
        assert!(msg.message.contains("25セット"));
    }

    #[test]
    fn varied_completion_message() {
        let msg = engine().completion_message(
            &WorkoutCompletionStats {
                total_sets: 10,
                total_volume: 1000.0,
                duration_minutes: 60,
                exercises: (0..5).map(|i| format!("ex{i}")).collect(),
            },
            &mut rng(),
        );
        assert_eq!(msg.kind, MessageKind::Achievement);
        assert!(msg.message.contains("5種目"));
    }

    #[test]
    fn default_completion_message_comes_from_the_pool() {
        let catalog = MessageCatalog::default();
        let msg = engine().completion_message(
            &WorkoutCompletionStats {
                total_sets: 3,
                total_volume: 200.0,
                duration_minutes: 20,
                exercises: vec!["a".into()],
            },
            &mut rng(),
        );
        assert_eq!(msg.kind, MessageKind::Achievement);
        assert_eq!(msg.emoji, "🎉");
        assert!(catalog.completion.contains(&msg.message));
    }

    #[test]
    fn volume_jump_is_celebrated_regardless_of_consistency() {
        let msg = engine().progress_message(&ProgressDelta {
            volume_increase: 25.0,
            strength_increase: 0.0,
            consistency_score: 10.0,
        });
        assert_eq!(msg.kind, MessageKind::Celebration);
    }

    #[test]
    fn progress_tiers() {
        let e = engine();
        let consistent = e.progress_message(&ProgressDelta {
            volume_increase: 0.0,
            strength_increase: 0.0,
            consistency_score: 90.0,
        });
        assert_eq!(consistent.kind, MessageKind::Achievement);

        let steady = e.progress_message(&ProgressDelta {
            volume_increase: 6.0,
            strength_increase: 0.0,
            consistency_score: 10.0,
        });
        assert_eq!(steady.kind, MessageKind::Achievement);
        assert!(steady.message.contains("着実"));

        let flat = e.progress_message(&ProgressDelta {
            volume_increase: 0.0,
            strength_increase: 0.0,
            consistency_score: 0.0,
        });
        assert_eq!(flat.kind, MessageKind::Encouragement);
    }

    #[test]
    fn empty_pool_is_rejected_at_construction() {
        let mut catalog = MessageCatalog::default();
        catalog.achievement.clear();
        let err = MotivationEngine::new(catalog).unwrap_err();
        assert!(matches!(err, MotivationError::EmptyCatalog("achievement")));
    }

    #[test]
    fn volume_formatting() {
        assert_eq!(format_volume(3500.0), "3,500");
        assert_eq!(format_volume(900.0), "900");
        assert_eq!(format_volume(1234567.5), "1,234,567.5");
        assert_eq!(format_volume(0.0), "0");
    }
}
