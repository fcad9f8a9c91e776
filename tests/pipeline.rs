use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde_json::json;

use vrtcorpus::annotators::{
    Annotation, Annotator, AnnotatorFactory, Lemmatize, LexiconModelsBuilder, OverrideTags,
    RuleTokenizer, Tag, TagLemma,
};
use vrtcorpus::error::Error;
use vrtcorpus::pipelines::vrt::{write_failures, PoolConfig, WorkerPool};
use vrtcorpus::pipelines::{Pipeline, VrtPipeline};
use vrtcorpus::processing::{merge, MergeOptions};

/// Tags everything NN, except that it loses a tag on sentences containing "kaputt".
struct BrittleTagger;

impl Tag for BrittleTagger {
    fn tag(&self, tokens: &[String]) -> Result<Vec<String>, Error> {
        let mut tags: Vec<String> = tokens.iter().map(|_| "NN".to_string()).collect();
        if tokens.iter().any(|t| t == "kaputt") {
            tags.pop();
        }
        Ok(tags)
    }
}

struct LowercaseLemmas;

impl Lemmatize for LowercaseLemmas {
    fn lemmatize(&self, token: &str, _tag: &str) -> Option<String> {
        Some(token.to_lowercase())
    }
}

struct UppercaseTagLemma;

impl TagLemma for UppercaseTagLemma {
    fn tag_lemma(&self, tokens: &[String]) -> Result<Vec<Annotation>, Error> {
        Ok(tokens
            .iter()
            .map(|t| Annotation::new("NE", &t.to_uppercase()))
            .collect())
    }
}

/// Panics on the token "boom".
struct PanickingTagger;

impl Tag for PanickingTagger {
    fn tag(&self, tokens: &[String]) -> Result<Vec<String>, Error> {
        if tokens.iter().any(|t| t == "boom") {
            panic!("tagger crashed");
        }
        Ok(tokens.iter().map(|_| "NN".to_string()).collect())
    }
}

struct PanickingModels;

impl AnnotatorFactory for PanickingModels {
    type Annotator = Annotator;

    fn load(&self) -> Result<Annotator, Error> {
        Ok(Annotator::new(
            Box::new(RuleTokenizer),
            Box::new(PanickingTagger),
            Box::new(LowercaseLemmas),
            Box::new(UppercaseTagLemma),
            OverrideTags::default(),
        ))
    }
}

#[derive(Default)]
struct StubModels {
    loads: AtomicUsize,
}

impl AnnotatorFactory for StubModels {
    type Annotator = Annotator;

    fn load(&self) -> Result<Annotator, Error> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(Annotator::new(
            Box::new(RuleTokenizer),
            Box::new(BrittleTagger),
            Box::new(LowercaseLemmas),
            Box::new(UppercaseTagLemma),
            OverrideTags::default(),
        ))
    }
}

fn record(idx: usize) -> serde_json::Value {
    let date = match idx {
        3 => "not-a-date".to_string(),
        _ => format!("2015-0{}-1{}", 1 + idx % 9, idx % 10),
    };
    let text = match idx {
        7 => "Das Rezept ist kaputt.".to_string(),
        _ => format!("Zwiebeln schneiden. Rezept {} kochen.\nServieren.", idx),
    };
    // odd records have no comments
    let comments: Vec<serde_json::Value> = if idx % 2 == 0 {
        vec![
            json!({"author": "ann", "date": "2016-02-03T10:11:12", "text": "Lecker. Sehr gut."}),
            json!({"author": "bob", "text": "Danke!"}),
        ]
    } else {
        vec![]
    };

    json!({
        "id": idx,
        "title": format!("Rezept {}", idx),
        "url": format!("https://example.org/{}", idx),
        "author": "koch",
        "category": "Süß & Sauer",
        "date": date,
        "rating": {"value": 4.2},
        "keywords": ["Gemüse", "schnell"],
        "ingredients": [{"name": "Zwiebel"}],
        "text": text,
        "comments": comments,
    })
}

fn dump(n: usize) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for idx in 0..n {
        let sub = dir.path().join(if idx < n / 2 { "a" } else { "b/c" });
        fs::create_dir_all(&sub).unwrap();
        fs::write(
            sub.join(format!("{}.json", idx)),
            serde_json::to_string(&record(idx)).unwrap(),
        )
        .unwrap();
        fs::write(sub.join("index.dat"), "not a record").unwrap();
    }
    dir
}

/// Numeric ids of elements opened with `<{name} id="{prefix}…">` in a VRT file.
fn ids_in(path: &Path, name: &str, prefix: &str) -> Vec<u64> {
    let start = format!("<{} id=\"{}", name, prefix);
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter_map(|l| l.strip_prefix(start.as_str()))
        .map(|rest| rest.split('"').next().unwrap().parse().unwrap())
        .collect()
}

fn vrt_files(root: &Path) -> Vec<PathBuf> {
    let pattern = format!("{}/**/*.vrt", root.display());
    glob::glob(&pattern).unwrap().map(Result::unwrap).collect()
}

#[test]
fn annotate_dump() {
    let src = dump(10);
    let dst = tempfile::tempdir().unwrap();
    let models = StubModels::default();

    let p = VrtPipeline::new(src.path().to_path_buf(), dst.path().to_path_buf(), models)
        .with_pool(PoolConfig {
            workers: 3,
            stagger: Duration::from_millis(10),
        });
    let report = p.run().unwrap();

    assert_eq!(report.len(), 10);
    assert_eq!(report.successes().count(), 8);

    let mut failed: Vec<String> = report
        .failures()
        .map(|(path, _)| path.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    failed.sort();
    assert_eq!(failed, vec!["3.json", "7.json"]);
    assert!(report
        .failures()
        .any(|(_, e)| matches!(e, Error::MalformedDate(_))));
    assert!(report
        .failures()
        .any(|(_, e)| matches!(e, Error::AnnotationMismatch { .. })));

    // no duplicate ids, in the report
    let mut sentence_ids = HashSet::new();
    let mut comment_ids = HashSet::new();
    for (_, summary) in report.successes() {
        for id in &summary.sentence_ids {
            assert!(sentence_ids.insert(*id), "duplicate sentence id {}", id);
        }
        for id in &summary.comment_ids {
            assert!(comment_ids.insert(*id), "duplicate comment id {}", id);
        }
    }
    // even records are commented, both failing ones are odd
    assert_eq!(comment_ids.len(), 10);

    // ...and in the written files
    let recipes = vrt_files(&dst.path().join("recipes"));
    let comments = vrt_files(&dst.path().join("comments"));
    assert_eq!(recipes.len(), 8);
    assert_eq!(comments.len(), 5);

    let mut written_sentences = Vec::new();
    let mut written_comments = Vec::new();
    for path in recipes.iter().chain(comments.iter()) {
        written_sentences.extend(ids_in(path, "s", "s"));
    }
    for path in &comments {
        written_comments.extend(ids_in(path, "comment", "c"));
    }
    assert_eq!(written_sentences.len(), sentence_ids.len());
    assert_eq!(
        written_sentences.into_iter().collect::<HashSet<_>>(),
        sentence_ids
    );
    assert_eq!(
        written_comments.into_iter().collect::<HashSet<_>>(),
        comment_ids
    );

    // records without comments have no comments file
    assert!(dst.path().join("recipes/b/c/9.vrt").is_file());
    assert!(!dst.path().join("comments/b/c/9_comments.vrt").exists());
    assert!(dst.path().join("comments/b/c/8_comments.vrt").is_file());

    // failed records leave nothing behind
    assert!(!dst.path().join("recipes/a/3.vrt").exists());
    assert!(!dst.path().join("recipes/b/c/7.vrt").exists());

    let mut errors = Vec::new();
    assert_eq!(write_failures(&report, &mut errors).unwrap(), 2);
    assert_eq!(String::from_utf8(errors).unwrap().lines().count(), 2);
}

#[test]
fn recipe_file_content() {
    let src = dump(2);
    let dst = tempfile::tempdir().unwrap();

    let p = VrtPipeline::new(
        src.path().to_path_buf(),
        dst.path().to_path_buf(),
        StubModels::default(),
    )
    .with_pool(PoolConfig {
        workers: 1,
        stagger: Duration::from_millis(0),
    })
    .with_id_start(100, 50);
    let report = p.run().unwrap();
    assert_eq!(report.successes().count(), 2);

    let recipe = fs::read_to_string(dst.path().join("recipes/a/0.vrt")).unwrap();
    let mut lines = recipe.lines();
    assert_eq!(
        lines.next().unwrap(),
        "<recipe title=\"Rezept 0\" id=\"0\" url=\"https://example.org/0\" author=\"koch\" \
date=\"2015-01-10\" yearmonth=\"2015-01\" year=\"2015\" rating=\"4.2\" rating_int=\"4\" \
category=\"Suess_und_Sauer\" category_orig=\"Süß &amp; Sauer\" keywords=\"|Gemüse|schnell|\" \
related=\"||\" ingredients=\"|Zwiebel|\">"
    );
    assert_eq!(lines.next().unwrap(), "<s id=\"s100\">");
    assert_eq!(lines.next().unwrap(), "Zwiebeln\tNN\tzwiebeln");
    assert_eq!(recipe.lines().last().unwrap(), "</recipe>");

    let comments = fs::read_to_string(dst.path().join("comments/a/0_comments.vrt")).unwrap();
    assert!(comments.contains(
        "<comment id=\"c50\" parent=\"0\" author=\"ann\" date=\"2016-02-03\" yearmonth=\"2016-02\" \
year=\"2016\" datetime_orig=\"2016-02-03T10:11:12\">"
    ));
    assert!(comments.contains(
        "<comment id=\"c51\" parent=\"0\" author=\"bob\" date=\"0000-00-00\" yearmonth=\"0000-00\" \
year=\"0000\" datetime_orig=\"\">"
    ));
}

#[test]
fn workers_load_models_once() {
    let models = StubModels::default();
    let pool = WorkerPool::new(PoolConfig {
        workers: 4,
        stagger: Duration::from_millis(0),
    })
    .unwrap();
    let ledger = pool
        .run(&models, (0..20).collect(), |_, task: &usize| {
            Ok::<_, Error>(*task)
        })
        .unwrap();
    assert_eq!(ledger.successes().count(), 20);
    assert_eq!(models.loads.load(Ordering::SeqCst), 4);
}

#[test]
fn annotate_with_lexicons_then_merge() {
    let models_dir = tempfile::tempdir().unwrap();
    let primary = models_dir.path().join("primary.tsv");
    let fallback = models_dir.path().join("fallback.tsv");
    fs::write(
        &primary,
        "Zwiebeln\tNN\tZwiebel\nschneiden\tVVINF\tschneid\n.\t$.\t.\n",
    )
    .unwrap();
    fs::write(
        &fallback,
        "Zwiebeln\tNN\tZwiebel\nschneiden\tVVINF\tschneiden\n.\t$.\t.\n",
    )
    .unwrap();

    let models = LexiconModelsBuilder::default()
        .primary(&primary)
        .fallback(&fallback)
        .build()
        .unwrap();

    let src = dump(3);
    let dst = tempfile::tempdir().unwrap();
    let p = VrtPipeline::new(src.path().to_path_buf(), dst.path().to_path_buf(), models)
        .with_pool(PoolConfig {
            workers: 2,
            stagger: Duration::from_millis(0),
        });
    let report = p.run().unwrap();
    assert_eq!(report.successes().count(), 3);

    let recipe = fs::read_to_string(dst.path().join("recipes/a/0.vrt")).unwrap();
    // VVINF lemma comes from the fallback lexicon
    assert!(recipe.contains("Zwiebeln\tNN\tZwiebel\nschneiden\tVVINF\tschneiden\n.\t$.\t.\n"));

    let corpus = dst.path().join("corpus.vrt");
    let n = merge(
        &dst.path().join("recipes"),
        &corpus,
        &MergeOptions {
            trim: true,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(n, 3);

    let merged = fs::read_to_string(&corpus).unwrap();
    assert!(merged.starts_with("<s id=\"s"));
    assert!(!merged.contains("<recipe"));
}

#[test]
fn panicking_annotator_fails_one_document() {
    let src = tempfile::tempdir().unwrap();
    for (idx, text) in ["Salz", "boom", "Zucker", "Mehl"].iter().enumerate() {
        fs::write(
            src.path().join(format!("{}.json", idx)),
            json!({"id": idx, "title": "t", "author": "a", "category": "c", "text": text})
                .to_string(),
        )
        .unwrap();
    }
    let dst = tempfile::tempdir().unwrap();

    let p = VrtPipeline::new(
        src.path().to_path_buf(),
        dst.path().to_path_buf(),
        PanickingModels,
    )
    .with_pool(PoolConfig {
        workers: 2,
        stagger: Duration::from_millis(0),
    });
    let report = p.run().unwrap();

    assert_eq!(report.len(), 4);
    assert_eq!(report.successes().count(), 3);
    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].0.ends_with("1.json"));
    assert!(matches!(failures[0].1, Error::Panic(_)));
    assert!(!dst.path().join("recipes/1.vrt").exists());
    assert!(dst.path().join("recipes/2.vrt").is_file());
}
