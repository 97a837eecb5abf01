//! Intonation and clarity sub-scores from already-extracted pitch (F0) and
//! first-formant (F1) tracks.

/// Both contours need this many points before they are compared directly.
pub const MIN_COMPARABLE_POINTS: usize = 10;
const HUMAN_PITCH_HZ: (f64, f64) = (50.0, 500.0);
const DEFAULT_F1_HZ: f64 = 500.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubScore {
    pub score: u8,
    pub status: String,
}

impl SubScore {
    fn new(score: i32, status: impl Into<String>) -> Self {
        Self {
            score: score.clamp(0, 100) as u8,
            status: status.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ContourStats {
    mean: f64,
    std: f64,
    range: f64,
}

impl ContourStats {
    fn of(values: &[f32]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let mean = values.iter().map(|&v| v as f64).sum::<f64>() / n;
        let var = values
            .iter()
            .map(|&v| {
                let d = v as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / n;
        let (min, max) = values.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v as f64), hi.max(v as f64))
        });
        Some(Self {
            mean,
            std: var.sqrt(),
            range: max - min,
        })
    }
}

/// 100 when equal, falling linearly to 0 at a 100% relative difference.
fn closeness(user: f64, reference: f64) -> i32 {
    let ratio = ((user - reference).abs() / reference.max(1.0)).min(1.0);
    (100.0 * (1.0 - ratio)) as i32
}

pub fn intonation_score(user_pitch_hz: &[f32], reference_pitch_hz: Option<&[f32]>) -> SubScore {
    let Some(user) = ContourStats::of(user_pitch_hz) else {
        return SubScore::new(0, "Cannot analyze intonation (no pitch detected)");
    };

    let comparable = reference_pitch_hz
        .filter(|r| r.len() >= MIN_COMPARABLE_POINTS && user_pitch_hz.len() >= MIN_COMPARABLE_POINTS)
        .and_then(ContourStats::of);

    let score = match comparable {
        Some(reference) => {
            if user.mean < HUMAN_PITCH_HZ.0 || user.mean > HUMAN_PITCH_HZ.1 {
                tracing::warn!(mean_hz = user.mean, "user pitch outside human voice range");
                return SubScore::new(0, "Cannot analyze intonation (implausible pitch)");
            }
            let mean_score = closeness(user.mean, reference.mean);
            let std_score = closeness(user.std, reference.std);
            let range_score = closeness(user.range, reference.range);
            (0.5 * mean_score as f64 + 0.3 * std_score as f64 + 0.2 * range_score as f64) as i32
        }
        None => match absolute_intonation(user.mean) {
            Ok(score) => score,
            Err(status) => return SubScore::new(0, status),
        },
    };

    SubScore::new(score, intonation_status(score))
}

fn absolute_intonation(mean: f64) -> Result<i32, &'static str> {
    if mean < HUMAN_PITCH_HZ.0 {
        return Err("Cannot analyze intonation (pitch too low)");
    }
    if mean > HUMAN_PITCH_HZ.1 {
        return Err("Cannot analyze intonation (pitch too high)");
    }
    let score = if (150.0..=300.0).contains(&mean) {
        80.0 + (20.0 * (1.0 - (mean - 225.0).abs() / 75.0)).min(20.0)
    } else if (80.0..=400.0).contains(&mean) {
        let distance = (mean - 150.0).abs().min((mean - 300.0).abs());
        (80.0 - distance / 5.0).max(50.0)
    } else if mean < 80.0 {
        (50.0 - (80.0 - mean) / 2.0).max(10.0)
    } else {
        (50.0 - (mean - 400.0) / 10.0).max(10.0)
    };
    Ok(score as i32)
}

fn intonation_status(score: i32) -> &'static str {
    match score {
        90..=i32::MAX => "Excellent intonation",
        75..=89 => "Natural intonation",
        50..=74 => "Acceptable intonation",
        _ => "Adjust your pitch",
    }
}

pub fn clarity_score(user_f1_hz: &[f32], reference_f1_hz: Option<&[f32]>) -> SubScore {
    let f1 = ContourStats::of(user_f1_hz)
        .map(|s| s.mean)
        .unwrap_or(DEFAULT_F1_HZ);
    let reference_mean = reference_f1_hz
        .and_then(ContourStats::of)
        .map(|s| s.mean)
        .filter(|&m| m > 0.0);

    let score = match reference_mean {
        Some(reference) => closeness(f1, reference).max(30),
        None if (450.0..=650.0).contains(&f1) => (100.0 * (1.0 - (f1 - 550.0).abs() / 100.0)) as i32,
        None if f1 < 450.0 => ((70.0 - (450.0 - f1) / 10.0) as i32).max(0),
        None => ((70.0 - (f1 - 650.0) / 15.0) as i32).max(0),
    };
    let score = score.clamp(0, 100);

    let status = match score {
        90..=i32::MAX => "Excellent clarity",
        75..=89 => "Good clarity",
        50..=74 => "Acceptable clarity",
        _ if f1 < 450.0 => "Open your mouth wider when speaking",
        _ if f1 > 650.0 => "Adjust your tongue position when speaking",
        _ => "Work on speaking more clearly",
    };
    SubScore::new(score, status)
}
