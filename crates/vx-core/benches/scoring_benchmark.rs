//! Scoring Benchmarks
//!
//! Measures the per-message cost of:
//! - Sentiment analysis
//! - Full three-dimension scoring
//! - Feedback composition

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use vx_core::feedback::FeedbackComposer;
use vx_core::scoring::{Scorer, SentimentAnalyzer};

const MESSAGES: &[(&str, &str)] = &[
    ("short", "Just get the shot."),
    (
        "reference",
        "I understand your concerns about side effects, but clinical trials with 30,000 participants \
         showed over 90% effectiveness.",
    ),
    (
        "long",
        "I hear you, and it makes sense to feel worried when you have allergies. For example, the \
         vaccine was tested in large clinical trials and most reactions were mild, like a sore arm \
         or feeling tired for a day. In other words, serious allergic reactions are very rare, and \
         clinics are prepared to treat them right away. What would help you feel more comfortable?",
    ),
];

fn bench_sentiment(c: &mut Criterion) {
    let mut group = c.benchmark_group("sentiment");
    let analyzer = SentimentAnalyzer::new();

    for (name, message) in MESSAGES {
        group.throughput(Throughput::Bytes(message.len() as u64));
        group.bench_with_input(BenchmarkId::new("polarity_scores", name), message, |b, m| {
            b.iter(|| black_box(analyzer.polarity_scores(black_box(m))))
        });
    }

    group.finish();
}

fn bench_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("scoring");
    let scorer = Scorer::new();

    for (name, message) in MESSAGES {
        group.throughput(Throughput::Bytes(message.len() as u64));
        group.bench_with_input(BenchmarkId::new("score", name), message, |b, m| {
            b.iter(|| black_box(scorer.score(black_box(m))))
        });
    }

    group.finish();
}

fn bench_feedback(c: &mut Criterion) {
    let mut group = c.benchmark_group("feedback");
    let scorer = Scorer::new();
    let composer = FeedbackComposer::new();

    for (name, message) in MESSAGES {
        let scores = scorer.score(message);
        group.bench_with_input(BenchmarkId::new("compose", name), message, |b, m| {
            b.iter(|| black_box(composer.compose(black_box(m), &scores)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sentiment, bench_scoring, bench_feedback);
criterion_main!(benches);
