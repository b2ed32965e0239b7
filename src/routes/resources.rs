use actix_files::NamedFile;
use actix_web::{get, error::ErrorNotFound, web::Path, Result};

const STYLESHEETS: [&str; 2] = ["layout", "theme"];

#[get("/{sheet}.css")]
pub async fn stylesheet(sheet: Path<String>) -> Result<NamedFile> {
    let sheet = sheet.into_inner();
    if !STYLESHEETS.contains(&sheet.as_str()) {
        return Err(ErrorNotFound("no such stylesheet"));
    }
    Ok(NamedFile::open(format!("assets/{sheet}.css"))?)
}
