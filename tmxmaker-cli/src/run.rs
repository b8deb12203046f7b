use std::{
    fs,
    io::BufWriter,
    path::{Path, PathBuf},
};

use clap::Parser;
use tempfile::NamedTempFile;
use tmxmaker::{Codec, DirectorySelection, RepositoryWalker, TmxWriter};
use tracing::{info, warn};
use unic_langid::LanguageIdentifier;

use crate::{config::Config, error::CliError};

/// Build an OmegaT translation memory from a locale repository and its
/// en-US counterpart.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Root of the locale repository
    pub locale_repo: PathBuf,
    /// Root of the en-US repository
    pub source_repo: PathBuf,
    /// Language code of the locale, e.g. `fr`
    pub target_lang: String,
    /// Language code of the source, usually `en-US`
    pub source_lang: String,
    /// Repository name, e.g. `central` or `gaia_2_0`
    pub repository: String,
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output: PathBuf,
    pub directories: usize,
    pub units: usize,
}

/// `<root>/TMX/<repository>/<target>/tm_<source>_<target>_forOmegaT.tmx`
pub fn output_path(root: &Path, repository: &str, target_lang: &str, source_lang: &str) -> PathBuf {
    root.join("TMX")
        .join(repository)
        .join(target_lang)
        .join(format!("tm_{source_lang}_{target_lang}_forOmegaT.tmx"))
}

pub fn run(args: &Args, config: &Config) -> Result<RunSummary, CliError> {
    check_language_code(&args.target_lang);
    check_language_code(&args.source_lang);

    let output = output_path(
        &config.root()?,
        &args.repository,
        &args.target_lang,
        &args.source_lang,
    );
    let directories = DirectorySelection::for_repository(&args.repository)
        .resolve(&args.locale_repo, &args.source_repo)?;
    info!(
        repository = %args.repository,
        directories = directories.len(),
        "selected components"
    );

    let units = write_tmx(args, &directories, &output)?;
    info!(output = %output.display(), units, "wrote translation memory");

    Ok(RunSummary {
        output,
        directories: directories.len(),
        units,
    })
}

/// Streams the document into a temporary file next to `output` and moves it
/// into place once it is complete. On error the temporary file is dropped,
/// which deletes it.
fn write_tmx(args: &Args, directories: &[String], output: &Path) -> Result<usize, CliError> {
    let parent = output.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(|e| CliError::output(parent, e))?;
    let temp = NamedTempFile::new_in(parent).map_err(|e| CliError::output(parent, e))?;

    let codec = Codec::new();
    let walker = RepositoryWalker::new(&codec, &args.locale_repo, &args.source_repo);
    let mut writer = TmxWriter::new(BufWriter::new(temp));

    writer.write_header(&args.source_lang)?;
    for directory in directories {
        for unit in walker.walk(directory)? {
            writer.write_unit(&unit, &args.source_lang, &args.target_lang)?;
        }
    }
    let units = writer.units_written();

    let temp = writer
        .close()?
        .into_inner()
        .map_err(|e| CliError::output(output, e.into_error()))?;
    let file = temp
        .persist(output)
        .map_err(|e| CliError::output(output, e.error))?;

    // Temporary files are created owner-only.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o644))
            .map_err(|e| CliError::output(output, e))?;
    }
    #[cfg(not(unix))]
    drop(file);

    Ok(units)
}

/// Mozilla locale codes are not always BCP 47 (`ja-JP-mac`), so this only
/// warns.
fn check_language_code(code: &str) {
    if code.parse::<LanguageIdentifier>().is_err() {
        warn!(code, "language code is not a valid BCP 47 identifier");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(locale: &Path, source: &Path, repository: &str) -> Args {
        Args {
            locale_repo: locale.to_path_buf(),
            source_repo: source.to_path_buf(),
            target_lang: "fr".to_string(),
            source_lang: "en-US".to_string(),
            repository: repository.to_string(),
        }
    }

    fn config(root: &Path) -> Config {
        Config::parse(&format!("[config]\nroot = {:?}\n", root.display().to_string())).unwrap()
    }

    #[test]
    fn test_output_path_layout() {
        assert_eq!(
            output_path(Path::new("/data"), "aurora", "fr", "en-US"),
            PathBuf::from("/data/TMX/aurora/fr/tm_en-US_fr_forOmegaT.tmx")
        );
    }

    #[test]
    fn test_args_are_positional() {
        let args = Args::try_parse_from(["tmxmaker", "l10n/fr", "en-US", "fr", "en-US", "central"])
            .unwrap();
        assert_eq!(args.locale_repo, PathBuf::from("l10n/fr"));
        assert_eq!(args.source_repo, PathBuf::from("en-US"));
        assert_eq!(args.target_lang, "fr");
        assert_eq!(args.source_lang, "en-US");
        assert_eq!(args.repository, "central");
    }

    #[test]
    fn test_missing_argument_is_rejected() {
        assert!(Args::try_parse_from(["tmxmaker", "a", "b", "fr", "en-US"]).is_err());
    }

    #[test]
    fn test_run_writes_document() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("en-US");
        let locale = temp_dir.path().join("fr");
        fs::create_dir_all(source.join("browser")).unwrap();
        fs::create_dir_all(locale.join("browser")).unwrap();
        fs::write(source.join("browser/a.properties"), "hello=Hello\nbye=Bye\n").unwrap();
        fs::write(locale.join("browser/a.properties"), "hello=Bonjour\nbye=\n").unwrap();

        let data = temp_dir.path().join("data");
        let summary = run(&args(&locale, &source, "central"), &config(&data)).unwrap();

        assert_eq!(summary.output, data.join("TMX/central/fr/tm_en-US_fr_forOmegaT.tmx"));
        assert_eq!(summary.directories, 1);
        assert_eq!(summary.units, 1);

        let content = fs::read_to_string(&summary.output).unwrap();
        assert!(content.contains("<prop type=\"file\">browser/a.properties</prop>"));
        assert!(content.contains("<seg>Bonjour</seg>"));
        assert!(content.ends_with("  </body>\n</tmx>"));
    }

    #[test]
    fn test_failed_run_leaves_no_output() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("en-US");
        let locale = temp_dir.path().join("fr");
        fs::create_dir_all(source.join("browser")).unwrap();
        fs::create_dir_all(locale.join("browser")).unwrap();
        fs::write(source.join("browser/a.dtd"), "<!ENTITY broken").unwrap();
        fs::write(locale.join("browser/a.dtd"), "").unwrap();

        let data = temp_dir.path().join("data");
        let result = run(&args(&locale, &source, "central"), &config(&data));
        assert!(matches!(result, Err(CliError::Tmx(_))));

        let out_dir = data.join("TMX/central/fr");
        assert_eq!(fs::read_dir(out_dir).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_root_key_fails_before_writing() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::parse("[config]\nlibraries = \"/x\"\n").unwrap();
        let result = run(&args(temp_dir.path(), temp_dir.path(), "central"), &config);
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
