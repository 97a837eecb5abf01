/// Reference sentences of the bundled practice recordings, keyed by sample id.
pub const SAMPLE_SENTENCES: [(&str, &str); 4] = [
    ("today_library", "今日、図書館で本を借りました。"),
    ("hello_friend", "こんにちは、友達！"),
    ("weather_good", "今日の天気はとても良いですね。"),
    ("japanese_study", "日本語を勉強することは楽しいです。"),
];

pub fn sample_sentence(sample_id: &str) -> Option<&'static str> {
    SAMPLE_SENTENCES
        .iter()
        .find(|(id, _)| *id == sample_id)
        .map(|&(_, sentence)| sentence)
}
