// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Exlibris-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Exlibris and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Exlibris CLI entrypoint.
//!
//! Runs the interactive cataloging form over a catalog: the built-in demo
//! data by default, or JSON files via `--catalog` and `--isbn-db`.

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::Mutex;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--catalog <file>] [--isbn-db <file>]\n  {program} --demo\n\nWithout --catalog the built-in demo catalog is used.\n--catalog loads authors, tags and shelving spots from a JSON file.\n--isbn-db adds ISBN records from a JSON file on top of the catalog.\n--demo runs on the built-in data alone and cannot be combined with the file flags."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    catalog: Option<String>,
    isbn_db: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--catalog" => {
                if options.catalog.is_some() {
                    return Err(());
                }
                options.catalog = Some(args.next().ok_or(())?);
            }
            "--isbn-db" => {
                if options.isbn_db.is_some() {
                    return Err(());
                }
                options.isbn_db = Some(args.next().ok_or(())?);
            }
            _ => return Err(()),
        }
    }

    if options.demo && (options.catalog.is_some() || options.isbn_db.is_some()) {
        return Err(());
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "exlibris".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let mut catalog = match &options.catalog {
            Some(path) => exlibris::services::Catalog::load(Path::new(path))?,
            None => exlibris::services::Catalog::demo(),
        };
        if let Some(path) = &options.isbn_db {
            catalog.load_isbn_db(Path::new(path))?;
        }

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        let ui_state = Arc::new(Mutex::new(exlibris::ui::UiState::default()));

        // The TUI blocks on crossterm events, so it runs on a blocking
        // thread while this thread keeps the runtime (and with it the
        // spawned lookups) moving.
        let handle = runtime.handle().clone();
        let tui_ui_state = ui_state.clone();
        let tui_join = runtime.block_on(async move {
            tokio::task::spawn_blocking(move || {
                exlibris::tui::run(catalog, tui_ui_state, handle).map_err(|err| err.to_string())
            })
            .await
        });

        let tui_result = tui_join.map_err(|err| -> Box<dyn Error> { Box::new(err) })?;
        tui_result.map_err(|err| {
            Box::new(std::io::Error::new(std::io::ErrorKind::Other, err)) as Box<dyn Error>
        })?;
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("exlibris: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_options, CliOptions};

    #[test]
    fn parses_empty_args() {
        let options = parse_options(std::iter::empty()).expect("parse options");
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn parses_demo_flag() {
        let options = parse_options(["--demo".to_owned()].into_iter()).expect("parse options");
        assert!(options.demo);
        assert!(options.catalog.is_none());
        assert!(options.isbn_db.is_none());
    }

    #[test]
    fn parses_catalog_path() {
        let options = parse_options(["--catalog".to_owned(), "shelf.json".to_owned()].into_iter())
            .expect("parse options");
        assert_eq!(options.catalog.as_deref(), Some("shelf.json"));
        assert!(!options.demo);
        assert!(options.isbn_db.is_none());
    }

    #[test]
    fn parses_isbn_db_path() {
        let options = parse_options(["--isbn-db".to_owned(), "books.json".to_owned()].into_iter())
            .expect("parse options");
        assert_eq!(options.isbn_db.as_deref(), Some("books.json"));
        assert!(options.catalog.is_none());
    }

    #[test]
    fn parses_both_file_flags_in_any_order() {
        let options = parse_options(
            [
                "--isbn-db".to_owned(),
                "books.json".to_owned(),
                "--catalog".to_owned(),
                "shelf.json".to_owned(),
            ]
            .into_iter(),
        )
        .expect("parse options");
        assert_eq!(options.catalog.as_deref(), Some("shelf.json"));
        assert_eq!(options.isbn_db.as_deref(), Some("books.json"));
    }

    #[test]
    fn rejects_demo_with_catalog() {
        parse_options(
            ["--demo".to_owned(), "--catalog".to_owned(), "shelf.json".to_owned()].into_iter(),
        )
        .unwrap_err();
    }

    #[test]
    fn rejects_demo_with_isbn_db() {
        parse_options(
            ["--isbn-db".to_owned(), "books.json".to_owned(), "--demo".to_owned()].into_iter(),
        )
        .unwrap_err();
    }

    #[test]
    fn rejects_unknown_args() {
        parse_options(["--nope".to_owned()].into_iter()).unwrap_err();

        parse_options(["shelf.json".to_owned()].into_iter()).unwrap_err();
    }

    #[test]
    fn rejects_duplicate_flags() {
        parse_options(["--demo".to_owned(), "--demo".to_owned()].into_iter()).unwrap_err();

        parse_options(
            [
                "--catalog".to_owned(),
                "one.json".to_owned(),
                "--catalog".to_owned(),
                "two.json".to_owned(),
            ]
            .into_iter(),
        )
        .unwrap_err();

        parse_options(
            [
                "--isbn-db".to_owned(),
                "one.json".to_owned(),
                "--isbn-db".to_owned(),
                "two.json".to_owned(),
            ]
            .into_iter(),
        )
        .unwrap_err();
    }

    #[test]
    fn rejects_missing_values() {
        parse_options(["--catalog".to_owned()].into_iter()).unwrap_err();

        parse_options(["--isbn-db".to_owned()].into_iter()).unwrap_err();
    }
}
