use std::fs;

use appjson_lib::codegen::Backend;
use appjson_lib::embed::{EmbedOptions, embed};
use appjson_lib::header::{ManifestHeader, write_header};
use appjson_lib::validate::load_manifest;

use super::common::{TestProject, two_components};

#[tokio::test]
async fn header_and_generated_source_share_checksum() {
  let project = TestProject::new(&two_components());
  let validated = load_manifest(project.root()).unwrap();

  let (path, written) = write_header(project.root(), &validated).await.unwrap();
  assert!(written);
  assert_eq!(path, project.generated("app.json.h"));

  let header = fs::read_to_string(&path).unwrap();
  let generated = embed(&EmbedOptions::new(project.root(), Backend::Cpp)).await.unwrap();
  assert!(header.contains(&format!(
    "#define ReactTestApp_AppManifestChecksum \"{}\"",
    generated.checksum
  )));
}

#[test]
fn header_omits_build_only_keys() {
  let project = TestProject::new(&two_components());
  let validated = load_manifest(project.root()).unwrap();
  let header = ManifestHeader::new(&validated).unwrap();

  assert!(!header.json().contains("$schema"));
  assert!(!header.json().contains("resources"));
  assert!(header.json().starts_with(r#"{"name":"Example","displayName":"Example","components":"#));
}
