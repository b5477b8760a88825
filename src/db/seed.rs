use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

struct SeedExercise<'a> {
    name: &'a str,
    name_en: &'a str,
    category: &'a str,
    description: &'a str,
}

/// Seeds the built-in exercise catalog. Idempotent: existing names are
/// left untouched.
pub async fn seed_exercises(pool: &PgPool) -> Result<()> {
    let exercises = vec![
        // Chest
        SeedExercise { name: "ベンチプレス", name_en: "Bench Press", category: "chest", description: "胸筋を鍛える基本的な種目" },
        SeedExercise { name: "インクラインベンチプレス", name_en: "Incline Bench Press", category: "chest", description: "上胸筋を重点的に鍛える" },
        SeedExercise { name: "ディクラインベンチプレス", name_en: "Decline Bench Press", category: "chest", description: "下胸筋を重点的に鍛える" },
        SeedExercise { name: "ダンベルプレス", name_en: "Dumbbell Press", category: "chest", description: "可動域が広く、バランスも鍛えられる" },
        SeedExercise { name: "プッシュアップ", name_en: "Push-up", category: "chest", description: "自重で胸筋を鍛える" },
        // Back
        SeedExercise { name: "デッドリフト", name_en: "Deadlift", category: "back", description: "全身の筋力を鍛える基本種目" },
        SeedExercise { name: "ラットプルダウン", name_en: "Lat Pulldown", category: "back", description: "広背筋を鍛える" },
        SeedExercise { name: "ベントオーバーロー", name_en: "Bent-over Row", category: "back", description: "背中の厚みを作る" },
        SeedExercise { name: "プルアップ", name_en: "Pull-up", category: "back", description: "自重で背筋を鍛える" },
        SeedExercise { name: "シーテッドロー", name_en: "Seated Row", category: "back", description: "背中の中央部を鍛える" },
        // Legs
        SeedExercise { name: "スクワット", name_en: "Squat", category: "legs", description: "脚の基本種目" },
        SeedExercise { name: "レッグプレス", name_en: "Leg Press", category: "legs", description: "脚の筋力を鍛える" },
        SeedExercise { name: "ルーマニアンデッドリフト", name_en: "Romanian Deadlift", category: "legs", description: "ハムストリングスを鍛える" },
        SeedExercise { name: "レッグカール", name_en: "Leg Curl", category: "legs", description: "ハムストリングスを集中して鍛える" },
        SeedExercise { name: "レッグエクステンション", name_en: "Leg Extension", category: "legs", description: "大腿四頭筋を集中して鍛える" },
        // Shoulders
        SeedExercise { name: "ショルダープレス", name_en: "Shoulder Press", category: "shoulders", description: "肩の基本種目" },
        SeedExercise { name: "サイドレイズ", name_en: "Lateral Raise", category: "shoulders", description: "肩の幅を作る" },
        SeedExercise { name: "フロントレイズ", name_en: "Front Raise", category: "shoulders", description: "前三角筋を鍛える" },
        SeedExercise { name: "リアデルトフライ", name_en: "Rear Delt Fly", category: "shoulders", description: "後三角筋を鍛える" },
        // Arms
        SeedExercise { name: "バーベルカール", name_en: "Barbell Curl", category: "arms", description: "上腕二頭筋の基本種目" },
        SeedExercise { name: "ダンベルカール", name_en: "Dumbbell Curl", category: "arms", description: "上腕二頭筋を鍛える" },
        SeedExercise { name: "トライセップスプッシュダウン", name_en: "Triceps Pushdown", category: "arms", description: "上腕三頭筋を鍛える" },
        SeedExercise { name: "オーバーヘッドエクステンション", name_en: "Overhead Extension", category: "arms", description: "上腕三頭筋を鍛える" },
        // Abs
        SeedExercise { name: "クランチ", name_en: "Crunch", category: "abs", description: "腹筋の基本種目" },
        SeedExercise { name: "プランク", name_en: "Plank", category: "abs", description: "体幹を鍛える" },
        SeedExercise { name: "レッグレイズ", name_en: "Leg Raise", category: "abs", description: "下腹部を鍛える" },
        SeedExercise { name: "ロシアンツイスト", name_en: "Russian Twist", category: "abs", description: "腹斜筋を鍛える" },
        // Full body
        SeedExercise { name: "バーピー", name_en: "Burpee", category: "full", description: "全身を使った有酸素運動" },
        SeedExercise { name: "マウンテンクライマー", name_en: "Mountain Climber", category: "full", description: "全身の筋力と持久力を鍛える" },
        SeedExercise { name: "ケトルベルスイング", name_en: "Kettlebell Swing", category: "full", description: "全身の爆発力を鍛える" },
    ];

    let count = exercises.len();
    for exercise in exercises {
        sqlx::query(
            r#"
            INSERT INTO exercises (id, name, name_en, category, description)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(exercise.name)
        .bind(exercise.name_en)
        .bind(exercise.category)
        .bind(exercise.description)
        .execute(pool)
        .await?;
    }

    tracing::info!("Exercise catalog seeded ({count} entries)");
    Ok(())
}
