//! `ifacegen-test` — run interface requests from the command line.
//!
//! ```text
//! ifacegen-test -req=interface-gen-open Foo2.swift -- Foo2.swift -I overlays \
//!     == -req=cursor -pos=18:49
//! ```
//!
//! Each `==`-separated segment is one request; later segments reuse the
//! source file, module and compiler arguments of the first. Responses are
//! printed to stdout in request order.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};

use ifacegen::Position;
use ifacegen::ide::{AnalysisHost, CursorPosition, DocumentSource, InterfaceRequest, Request};

/// Flags spelled with a single dash, as `sourcekitd-test` does.
const SINGLE_DASH_FLAGS: &[&str] = &[
    "req",
    "pos",
    "offset",
    "usr",
    "module",
    "name",
    "check-interface-ascii",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum RequestKind {
    InterfaceGen,
    InterfaceGenOpen,
    Cursor,
    FindUsr,
    Close,
}

/// One request segment.
#[derive(Debug, Parser)]
#[command(name = "ifacegen-test", about = "Generate Swift interfaces and query them")]
struct SegmentArgs {
    #[arg(long, value_enum)]
    req: RequestKind,

    /// Cursor position as `line:column` (1-based)
    #[arg(long, value_parser = parse_line_col, conflicts_with = "offset")]
    pos: Option<Position>,

    /// Cursor position as a byte offset
    #[arg(long)]
    offset: Option<u32>,

    #[arg(long)]
    usr: Option<String>,

    /// Generate the interface of a module on the search paths
    #[arg(long)]
    module: Option<String>,

    /// Name of the opened document (defaults to the source path or module)
    #[arg(long)]
    name: Option<String>,

    #[arg(long = "check-interface-ascii")]
    check_interface_ascii: bool,

    /// Source file
    source: Option<PathBuf>,

    /// Compiler arguments (after `--`)
    #[arg(last = true)]
    compiler_args: Vec<String>,
}

/// Values a segment inherits from the first one.
#[derive(Clone, Debug, Default)]
struct Inherited {
    source: Option<PathBuf>,
    module: Option<String>,
    compiler_args: Vec<String>,
}

fn main() {
    if let Err(error) = run() {
        eprintln!("ifacegen-test error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    init_tracing()?;

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let mut host = AnalysisHost::new();
    let mut inherited: Option<Inherited> = None;

    for (i, segment) in split_segments(&argv).into_iter().enumerate() {
        let args = parse_segment(segment).with_context(|| format!("invalid request #{}", i + 1))?;
        let base = inherited.get_or_insert_with(|| Inherited {
            source: args.source.clone(),
            module: args.module.clone(),
            compiler_args: args.compiler_args.clone(),
        });
        let request = build_request(args, base)?;
        let kind = request.kind();
        let response = host
            .handle(request)
            .with_context(|| format!("{kind} request failed"))?;
        print!("{response}");
    }
    Ok(())
}

fn init_tracing() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env("IFACEGEN_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn split_segments(argv: &[String]) -> Vec<&[String]> {
    argv.split(|arg| arg == "==").collect()
}

fn parse_segment(segment: &[String]) -> anyhow::Result<SegmentArgs> {
    let mut normalized = vec!["ifacegen-test".to_string()];
    let mut after_separator = false;
    for arg in segment {
        if arg == "--" {
            after_separator = true;
        }
        normalized.push(if after_separator {
            arg.clone()
        } else {
            double_dash(arg)
        });
    }
    Ok(SegmentArgs::try_parse_from(normalized)?)
}

/// `-req=cursor` → `--req=cursor`; other arguments are left alone.
fn double_dash(arg: &str) -> String {
    let Some(flag) = arg.strip_prefix('-').filter(|rest| !rest.starts_with('-')) else {
        return arg.to_string();
    };
    let name = flag.split_once('=').map_or(flag, |(name, _)| name);
    if SINGLE_DASH_FLAGS.contains(&name) {
        format!("-{arg}")
    } else {
        arg.to_string()
    }
}

fn parse_line_col(value: &str) -> Result<Position, String> {
    let (line, column) = value
        .split_once(':')
        .ok_or_else(|| format!("expected LINE:COLUMN, got '{value}'"))?;
    let line = line.parse::<u32>().map_err(|e| format!("bad line: {e}"))?;
    let column = column.parse::<u32>().map_err(|e| format!("bad column: {e}"))?;
    if line == 0 || column == 0 {
        return Err("line and column are 1-based".to_string());
    }
    Ok(Position::new(line, column))
}

fn build_request(args: SegmentArgs, base: &Inherited) -> anyhow::Result<Request> {
    let source = args.source.or_else(|| base.source.clone());
    let module = args.module.or_else(|| base.module.clone());
    let compiler_args = if args.compiler_args.is_empty() {
        base.compiler_args.clone()
    } else {
        args.compiler_args
    };

    let document = match (module, source) {
        (Some(module), _) => DocumentSource::Module(module.into()),
        (None, Some(source)) => DocumentSource::File(source),
        (None, None) => bail!("no source file or -module given"),
    };
    let name = args.name.unwrap_or_else(|| document.default_name());

    Ok(match args.req {
        RequestKind::InterfaceGen => Request::InterfaceGen(
            InterfaceRequest::new(document, compiler_args)
                .with_ascii_check(args.check_interface_ascii),
        ),
        RequestKind::InterfaceGenOpen => Request::InterfaceGenOpen {
            name,
            request: InterfaceRequest::new(document, compiler_args)
                .with_ascii_check(args.check_interface_ascii),
        },
        RequestKind::Cursor => {
            let position = match (args.pos, args.offset) {
                (Some(pos), _) => CursorPosition::LineCol(pos),
                (None, Some(offset)) => CursorPosition::Offset(offset),
                (None, None) => bail!("cursor requests need -pos or -offset"),
            };
            Request::CursorInfo {
                name,
                position,
                args: compiler_args,
            }
        }
        RequestKind::FindUsr => Request::FindUsr {
            name,
            usr: args.usr.context("find-usr requests need -usr")?,
        },
        RequestKind::Close => Request::Close { name },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_segments_inherit_source_and_args() {
        let argv = argv("-req=interface-gen-open Foo2.swift -- Foo2.swift -I dir == -req=cursor -pos=18:49");
        let segments = split_segments(&argv);
        assert_eq!(segments.len(), 2);

        let first = parse_segment(segments[0]).unwrap();
        assert_eq!(first.req, RequestKind::InterfaceGenOpen);
        assert_eq!(first.compiler_args, ["Foo2.swift", "-I", "dir"]);
        let base = Inherited {
            source: first.source.clone(),
            module: None,
            compiler_args: first.compiler_args.clone(),
        };

        let cursor = build_request(parse_segment(segments[1]).unwrap(), &base).unwrap();
        assert_eq!(
            cursor,
            Request::CursorInfo {
                name: "Foo2.swift".to_string(),
                position: CursorPosition::LineCol(Position::new(18, 49)),
                args: vec!["Foo2.swift".into(), "-I".into(), "dir".into()],
            }
        );
    }

    #[test]
    fn test_flag_spelling() {
        assert_eq!(double_dash("-req=cursor"), "--req=cursor");
        assert_eq!(double_dash("-check-interface-ascii"), "--check-interface-ascii");
        assert_eq!(double_dash("-I"), "-I");
        assert_eq!(double_dash("--req=cursor"), "--req=cursor");

        // Compiler arguments after `--` are not rewritten
        let args = parse_segment(&argv("-req=interface-gen -module=Foo -- -module-name Foo")).unwrap();
        assert_eq!(args.module.as_deref(), Some("Foo"));
        assert_eq!(args.compiler_args, ["-module-name", "Foo"]);
    }

    #[test]
    fn test_invalid_segments() {
        assert!(parse_segment(&argv("-req=cursor -pos=0:3 a.swift")).is_err());
        assert!(parse_segment(&argv("-req=bogus a.swift")).is_err());
        let args = parse_segment(&argv("-req=cursor a.swift")).unwrap();
        assert!(build_request(args, &Inherited::default()).is_err());
    }
}
