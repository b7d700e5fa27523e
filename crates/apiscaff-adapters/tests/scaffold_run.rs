//! End-to-end scaffold runs over real adapters.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use apiscaff_adapters::{
    GlobFileMatcher, LocalFilesystem, SpecFileParser, XmlDocumentParser, ZipArchiveLocator,
};
use apiscaff_core::{
    application::ports::{ArtifactRepository, GenerationEngine},
    domain::{
        GeneratedArtifact, GlobQuery, ResourceCoordinate, ScaffolderContext,
        ScaffoldingAccessories, ScaffoldingConfiguration, ScaffoldingResult, SpecSource,
    },
    error::ScaffResult,
    prelude::*,
};

/// Engine double: one config per API, named after it, plus one unnamed resource.
#[derive(Clone, Default)]
struct RecordingEngine {
    seen: Arc<Mutex<Vec<ScaffoldingConfiguration>>>,
}

impl GenerationEngine for RecordingEngine {
    fn run(
        &self,
        _context: &ScaffolderContext,
        configuration: &ScaffoldingConfiguration,
    ) -> ScaffResult<ScaffoldingResult> {
        self.seen.lock().unwrap().push(configuration.clone());
        let name = format!("{}.xml", configuration.api().name());
        Ok(ScaffoldingResult::success(
            vec![GeneratedArtifact::new(name, "<mule/>")],
            vec![GeneratedArtifact::new("", "<resource/>")],
        ))
    }
}

/// Engine double that returns one config under a fixed name.
struct NamingEngine(String);

impl GenerationEngine for NamingEngine {
    fn run(
        &self,
        _context: &ScaffolderContext,
        _configuration: &ScaffoldingConfiguration,
    ) -> ScaffResult<ScaffoldingResult> {
        Ok(ScaffoldingResult::success(
            vec![GeneratedArtifact::new(self.0.clone(), "<mule/>")],
            vec![],
        ))
    }
}

/// Repository double that always answers with the same archive.
struct FixedRepository(PathBuf);

impl ArtifactRepository for FixedRepository {
    fn resolve(&self, _coordinate: &ResourceCoordinate) -> ScaffResult<PathBuf> {
        Ok(self.0.clone())
    }
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn service(repository: PathBuf, engine: impl GenerationEngine + 'static) -> ScaffoldService {
    ScaffoldService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(GlobFileMatcher::new()),
        CoordinateResolver::new(
            Box::new(FixedRepository(repository)),
            Box::new(ZipArchiveLocator::new()),
        ),
        Box::new(SpecFileParser::new()),
        Box::new(XmlDocumentParser::new()),
        Box::new(engine),
    )
}

fn request(base: &Path, source: SpecSource) -> ScaffoldRequest {
    ScaffoldRequest {
        source,
        existing_documents: GlobQuery::config_documents(base),
        domain: Some(GlobQuery::domain_descriptors(base.join("domain"))),
        accessories: ScaffoldingAccessories::default(),
        context: ScaffolderContext::default(),
        output: OutputDirs::under(base),
    }
}

#[test]
fn scaffolds_every_spec_under_the_api_folder() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path();
    write(base, "src/main/resources/api/hello.raml", "#%RAML 1.0\ntitle: Hello\n");
    write(base, "src/main/resources/api/bye.yml", "#%RAML 1.0\ntitle: Bye\n");
    write(base, "src/main/resources/api/lala/wow.raml", "#%RAML 1.0\ntitle: Wow\n");
    write(base, "src/main/dont-read.raml", "#%RAML 1.0\ntitle: Nope\n");
    write(base, "src/main/resources/api/broken.raml", "title: [unclosed\n");
    write(base, "domain/a-domain.xml", "<mule-domain/>");
    write(base, "domain/b-domain.xml", "<mule-domain/>");

    let engine = RecordingEngine::default();
    let summary = service(PathBuf::new(), engine.clone())
        .scaffold(&request(base, SpecSource::Glob(GlobQuery::spec_files(base))))
        .unwrap();

    assert_eq!(summary.specifications, 3);
    assert_eq!(summary.skipped, 1);

    let seen = engine.seen.lock().unwrap();
    let mut names: Vec<_> = seen.iter().map(|c| c.api().name().to_string()).collect();
    names.sort();
    assert_eq!(names, ["bye", "hello", "wow"]);
    assert!(seen.iter().all(|c| c.domain().map(|d| d.name()) == Some("a-domain.xml")));

    for name in ["hello", "bye", "wow"] {
        assert_eq!(
            fs::read_to_string(base.join(format!("src/main/mule/{name}.xml"))).unwrap(),
            "<mule/>"
        );
    }
    assert_eq!(
        fs::read_to_string(base.join("src/main/resources/api.xml")).unwrap(),
        "<resource/>"
    );
}

#[test]
fn second_run_sees_documents_written_by_the_first() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path();
    write(base, "src/main/resources/api/hello.raml", "#%RAML 1.0\ntitle: Hello\n");

    let first = RecordingEngine::default();
    service(PathBuf::new(), first.clone())
        .scaffold(&request(base, SpecSource::Glob(GlobQuery::spec_files(base))))
        .unwrap();
    assert!(first.seen.lock().unwrap()[0].existing_documents().is_empty());

    let second = RecordingEngine::default();
    service(PathBuf::new(), second.clone())
        .scaffold(&request(base, SpecSource::Glob(GlobQuery::spec_files(base))))
        .unwrap();

    // api.xml under resources is not a <mule> document and is skipped.
    let seen = second.seen.lock().unwrap();
    let names: Vec<_> = seen[0].existing_documents().iter().map(|d| d.name()).collect();
    assert_eq!(names, ["hello.xml"]);
}

#[test]
fn scaffolds_from_a_packaged_api() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path();
    // Local spec files are ignored when a coordinate is given.
    write(base, "src/main/resources/api/local.raml", "#%RAML 1.0\ntitle: Local\n");

    let archive = base.join("orders-1.0.0-fat-raml.zip");
    let mut writer = zip::ZipWriter::new(fs::File::create(&archive).unwrap());
    let options = zip::write::SimpleFileOptions::default();
    writer.start_file("exchange.json", options).unwrap();
    writer.write_all(br#"{"main": "orders.raml", "assetId": "orders"}"#).unwrap();
    writer.start_file("orders.raml", options).unwrap();
    writer.write_all(b"#%RAML 1.0\ntitle: Orders\n").unwrap();
    writer.finish().unwrap();

    let coordinate = ResourceCoordinate::from_gav(Some("com.acme"), Some("orders"), Some("1.0.0"))
        .unwrap()
        .unwrap();
    let engine = RecordingEngine::default();
    let summary = service(archive.clone(), engine.clone())
        .scaffold(&request(base, SpecSource::Coordinate(coordinate)))
        .unwrap();

    assert_eq!(summary.specifications, 1);
    let seen = engine.seen.lock().unwrap();
    assert_eq!(seen[0].api().name(), "orders");
    assert_eq!(
        seen[0].api().reference().uri(),
        format!("jar:file:{}!/orders.raml", archive.display())
    );
    assert_eq!(
        seen[0].api_sync_resource(),
        Some("resource::com.acme:orders:1.0.0:fat-raml:zip:orders.raml")
    );
    assert!(base.join("src/main/mule/orders.xml").is_file());
    assert!(!base.join("src/main/mule/local.xml").exists());
}

#[test]
fn extract_mode_finds_a_nested_main_document() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("orders-1.0.0-fat-raml.zip");
    let mut writer = zip::ZipWriter::new(fs::File::create(&archive).unwrap());
    let options = zip::write::SimpleFileOptions::default();
    writer.start_file("exchange.json", options).unwrap();
    writer.write_all(br#"{"main": "api/orders.raml"}"#).unwrap();
    writer.start_file("api/orders.raml", options).unwrap();
    writer.write_all(b"#%RAML 1.0\ntitle: Orders\n").unwrap();
    writer.finish().unwrap();

    let destination = dir.path().join("unpacked");
    let resolver = CoordinateResolver::new(
        Box::new(FixedRepository(archive)),
        Box::new(ZipArchiveLocator::new()),
    )
    .with_mode(ArchiveMode::Extract {
        destination: destination.clone(),
    });
    let coordinate = ResourceCoordinate::from_gav(Some("com.acme"), Some("orders"), Some("1.0.0"))
        .unwrap()
        .unwrap();

    let lookup = resolver.locate(&coordinate).unwrap();
    assert_eq!(
        lookup.into_reference(),
        Some(ApiReference::file(destination.join("api/api.raml")))
    );
}

#[test]
fn engine_cannot_write_outside_the_project() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("proj");
    write(&base, "src/main/resources/api/hello.raml", "#%RAML 1.0\ntitle: Hello\n");

    let outside = dir.path().join("outside.xml");
    for name in [outside.display().to_string(), "../../../escaped.xml".to_string()] {
        let err = service(PathBuf::new(), NamingEngine(name.clone()))
            .scaffold(&request(&base, SpecSource::Glob(GlobQuery::spec_files(&base))))
            .unwrap_err();
        assert!(err.to_string().contains(&name), "{err}");
    }

    assert!(!outside.exists());
    assert!(!base.join("escaped.xml").exists());
    assert!(!base.join("src/main/mule").exists());
}
