use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jovia::archetype::{AxisInferrer, ThemeScorer};
use jovia::aspects::AspectDetector;
use jovia::placement::place_all;
use jovia::PlanetPosition;

fn positions() -> Vec<PlanetPosition> {
    [
        ("Sun", 10.0),
        ("Moon", 205.0),
        ("Mercury", 22.0),
        ("Venus", 48.0),
        ("Mars", 50.0),
        ("Jupiter", 170.0),
        ("Saturn", 100.0),
        ("Uranus", 262.0),
        ("Neptune", 25.0),
        ("Pluto", 228.0),
        ("Chiron", 131.0),
    ]
    .into_iter()
    .map(|(name, lon)| PlanetPosition::at(name, lon).unwrap())
    .collect()
}

fn bench_theme_scoring(c: &mut Criterion) {
    let bodies = positions();
    let aspects = AspectDetector::default().natal_aspects(&bodies).unwrap();
    let placed = place_all(&bodies, None).unwrap();
    let scorer = ThemeScorer::default();

    c.bench_function("score_themes", |b| {
        b.iter(|| scorer.score(black_box(&aspects), black_box(&placed)))
    });
}

fn bench_axis_inference(c: &mut Criterion) {
    let bodies = positions();
    let aspects = AspectDetector::default().natal_aspects(&bodies).unwrap();
    let placed = place_all(&bodies, None).unwrap();
    let scores = ThemeScorer::default().score(&aspects, &placed);
    let inferrer = AxisInferrer::default();

    c.bench_function("infer_axis", |b| {
        b.iter(|| inferrer.infer(black_box(&scores), black_box(&aspects)))
    });
}

criterion_group!(benches, bench_theme_scoring, bench_axis_inference);
criterion_main!(benches);
