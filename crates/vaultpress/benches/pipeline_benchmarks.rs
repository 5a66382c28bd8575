//! Performance benchmarks for indexing and rendering

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::fs;
use std::hint::black_box;
use tempfile::TempDir;
use vaultpress::prelude::*;

/// Setup a vault of interlinked notes spread over a few folders
fn setup_bench_vault(num_files: usize) -> (TempDir, PublishConfig) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();

    for i in 0..num_files {
        let dir = root.join(format!("Folder {}", i % 10));
        fs::create_dir_all(&dir).expect("Failed to create folder");
        let content = format!(
            "# Note {}\n\nLinks to [[Note {}]] and [[Note {}#Heading]].\n\n![[image{}.png]]\n",
            i,
            (i + 1) % num_files,
            (i + 2) % num_files,
            i % 20
        );
        fs::write(dir.join(format!("Note {}.md", i)), content).expect("Failed to write note");
    }

    let media = root.join("_Organization/_Media");
    fs::create_dir_all(&media).expect("Failed to create media dir");
    for i in 0..20 {
        fs::write(media.join(format!("image{}.png", i)), b"").expect("Failed to write image");
    }

    let config = PublishConfig::builder(root)
        .build()
        .expect("Failed to create config");
    (temp_dir, config)
}

fn sample_document(links: usize) -> String {
    let mut doc = String::from("---\ntitle: Bench\n---\n\n# Bench\n\n");
    for i in 0..links {
        doc.push_str(&format!(
            "Paragraph {} with [[Note {}]], [[#Section {}]] and ![[image{}.png|caption]]. %%hidden%%\n\n",
            i,
            i,
            i,
            i % 20
        ));
    }
    doc
}

/// Benchmark index construction at different vault sizes
fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");

    for size in [100, 1000] {
        let (_temp_dir, config) = setup_bench_vault(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &config, |b, config| {
            b.iter(|| VaultIndex::build(black_box(config)).unwrap())
        });
    }

    group.finish();
}

/// Benchmark the full parse → transform → render pipeline
fn bench_render(c: &mut Criterion) {
    let (_temp_dir, config) = setup_bench_vault(100);
    let publisher = Publisher::new(config, SlugMap::new()).unwrap();
    let mut group = c.benchmark_group("render_markdown");

    for links in [10, 100] {
        let doc = sample_document(links);
        group.bench_with_input(BenchmarkId::from_parameter(links), &doc, |b, doc| {
            b.iter(|| publisher.render_markdown(black_box(doc)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_index_build, bench_render);
criterion_main!(benches);
