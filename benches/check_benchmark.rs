//! Benchmarks for idmlcheck model building and rule evaluation.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic packages written to a temporary directory.

use std::fs;
use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

const NS: &str = "http://ns.adobe.com/AdobeInDesign/idml/1.0/packaging";

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn package_xml(element: &str, body: &str) -> String {
    format!(r#"<idPkg:{element} xmlns:idPkg="{NS}" DOMVersion="18.0">{body}</idPkg:{element}>"#)
}

/// Creates an unpacked package with one story per spread.
fn create_test_package(root: &Path, spread_count: usize) {
    write(
        root,
        "Resources/Fonts.xml",
        &package_xml(
            "Fonts",
            r#"<FontFamily Self="di1" Name="Minion Pro"><Font Name="Regular" FontType="OpenTypeCFF"/></FontFamily>"#,
        ),
    );
    write(
        root,
        "Resources/Styles.xml",
        &package_xml(
            "Styles",
            r#"<RootParagraphStyleGroup><ParagraphStyle Self="ParagraphStyle/$ID/[No paragraph style]" Hyphenation="true"><Properties><AppliedFont type="string">Minion Pro</AppliedFont></Properties></ParagraphStyle><ParagraphStyle Self="ParagraphStyle/Body" KerningMethod="$ID/Optical"><Properties><BasedOn type="string">$ID/[No paragraph style]</BasedOn></Properties></ParagraphStyle></RootParagraphStyleGroup>"#,
        ),
    );
    write(
        root,
        "Resources/Preferences.xml",
        &package_xml("Preferences", r#"<DocumentPreference DocumentBleedTopOffset="9"/>"#),
    );

    for i in 0..spread_count {
        let spread = format!(
            r#"<Spread Self="s{i}"><Page Self="p{i}" Name="{page}"/><TextFrame Self="f{i}" ParentStory="t{i}"/><Rectangle Self="r{i}" ItemTransform="1 0 0 1 0 0"><Image Self="i{i}" ItemTransform="0 1 -1 0 0 0"><Link Self="l{i}" LinkResourceURI="file:/Links/image{i}.jpg" StoredState="Normal"/></Image></Rectangle></Spread>"#,
            page = i + 1
        );
        write(root, &format!("Spreads/Spread_s{i}.xml"), &package_xml("Spread", &spread));

        let story = format!(
            r#"<Story Self="t{i}"><ParagraphStyleRange AppliedParagraphStyle="ParagraphStyle/Body" PointSize="11"><CharacterStyleRange><Content>Paragraph {i} of the benchmark story.</Content></CharacterStyleRange></ParagraphStyleRange><ParagraphStyleRange AppliedParagraphStyle="ParagraphStyle/$ID/[No paragraph style]"><CharacterStyleRange FontStyle="Bold"><Content>Default styled text.</Content></CharacterStyleRange></ParagraphStyleRange></Story>"#
        );
        write(root, &format!("Stories/Story_t{i}.xml"), &package_xml("Story", &story));
    }
}

/// Benchmark model building at various sizes.
fn bench_model_building(c: &mut Criterion) {
    let mut group = c.benchmark_group("model_building");

    for spread_count in [1, 10, 50].iter() {
        let dir = tempfile::tempdir().unwrap();
        create_test_package(dir.path(), *spread_count);

        group.bench_function(format!("{}_spreads", spread_count), |b| {
            b.iter(|| idmlcheck::parse_dir(black_box(dir.path())).unwrap());
        });
    }

    group.finish();
}

/// Benchmark rule evaluation over an already built document.
fn bench_rules(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    create_test_package(dir.path(), 50);
    let document = idmlcheck::parse_dir(dir.path()).unwrap();
    let options = idmlcheck::RuleOptions::default();

    c.bench_function("run_checks_50_spreads", |b| {
        b.iter(|| idmlcheck::run_checks(black_box(&document), &options));
    });
}

/// Benchmark a full run down to JSON.
fn bench_full_report(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    create_test_package(dir.path(), 10);

    c.bench_function("check_dir_to_json_10_spreads", |b| {
        b.iter(|| {
            idmlcheck::check_dir_to_json(black_box(dir.path()), idmlcheck::JsonFormat::Compact)
                .unwrap()
        });
    });
}

criterion_group!(benches, bench_model_building, bench_rules, bench_full_report);
criterion_main!(benches);
