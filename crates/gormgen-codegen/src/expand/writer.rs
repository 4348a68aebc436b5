use std::collections::BTreeMap;

/// Line-oriented Go source buffer, indented with tabs as gofmt does.
#[derive(Debug, Default)]
pub(super) struct Writer {
    buf: String,
    depth: usize,
}

impl Writer {
    pub(super) fn new() -> Writer {
        Writer::default()
    }

    pub(super) fn line(&mut self, line: impl AsRef<str>) {
        let line = line.as_ref();

        if !line.is_empty() {
            for _ in 0..self.depth {
                self.buf.push('\t');
            }
            self.buf.push_str(line);
        }

        self.buf.push('\n');
    }

    pub(super) fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Writes `comment` as `//` lines.
    pub(super) fn comment(&mut self, comment: &str) {
        for line in comment.trim_end().lines() {
            let line = line.trim_end();
            if line.is_empty() {
                self.line("//");
            } else {
                self.line(format!("// {}", line.trim_start()));
            }
        }
    }

    /// Writes `header {`, the body one level deeper, then `}`.
    pub(super) fn block(&mut self, header: impl AsRef<str>, body: impl FnOnce(&mut Writer)) {
        self.block_with(header, "}", body);
    }

    /// Like [`Writer::block`] with a custom closing line, e.g. `})`.
    pub(super) fn block_with(
        &mut self,
        header: impl AsRef<str>,
        close: &str,
        body: impl FnOnce(&mut Writer),
    ) {
        self.line(format!("{} {{", header.as_ref()));
        self.indented(body);
        self.line(close);
    }

    /// Writes `body` one level deeper.
    pub(super) fn indented(&mut self, body: impl FnOnce(&mut Writer)) {
        self.depth += 1;
        body(self);
        self.depth -= 1;
    }

    /// `if err != nil { return <ret> }`
    pub(super) fn return_on_err(&mut self, ret: &str) {
        self.block("if err != nil", |w| w.line(format!("return {ret}")));
    }

    pub(super) fn into_string(self) -> String {
        self.buf
    }
}

/// Go packages referenced by the generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(super) enum GoImport {
    Clause,
    Context,
    Crdbgorm,
    Gorm,
    Lo,
    Pgtype,
    Pq,
    Protojson,
    Structpb,
    Time,
    Timestamppb,
    Uuid,
}

impl GoImport {
    pub(super) fn alias(self) -> &'static str {
        match self {
            GoImport::Clause => "clause",
            GoImport::Context => "context",
            GoImport::Crdbgorm => "crdbgorm",
            GoImport::Gorm => "gorm",
            GoImport::Lo => "lo",
            GoImport::Pgtype => "pgtype",
            GoImport::Pq => "pq",
            GoImport::Protojson => "protojson",
            GoImport::Structpb => "structpb",
            GoImport::Time => "time",
            GoImport::Timestamppb => "timestamppb",
            GoImport::Uuid => "uuid",
        }
    }

    pub(super) fn path(self) -> &'static str {
        match self {
            GoImport::Clause => "gorm.io/gorm/clause",
            GoImport::Context => "context",
            GoImport::Crdbgorm => "github.com/cockroachdb/cockroach-go/v2/crdb/crdbgorm",
            GoImport::Gorm => "gorm.io/gorm",
            GoImport::Lo => "github.com/samber/lo",
            GoImport::Pgtype => "github.com/jackc/pgtype",
            GoImport::Pq => "github.com/lib/pq",
            GoImport::Protojson => "google.golang.org/protobuf/encoding/protojson",
            GoImport::Structpb => "google.golang.org/protobuf/types/known/structpb",
            GoImport::Time => "time",
            GoImport::Timestamppb => "google.golang.org/protobuf/types/known/timestamppb",
            GoImport::Uuid => "github.com/google/uuid",
        }
    }
}

/// The imports of one generated file. Unused imports do not compile in Go,
/// so only packages actually referenced are recorded.
#[derive(Debug, Default)]
pub(super) struct Imports {
    used: BTreeMap<&'static str, GoImport>,
}

impl Imports {
    pub(super) fn add(&mut self, import: GoImport) {
        self.used.insert(import.path(), import);
    }

    /// Writes the import block, sorted by path.
    pub(super) fn write(&self, w: &mut Writer) {
        if self.used.is_empty() {
            return;
        }

        w.line("import (");
        w.indented(|w| {
            for import in self.used.values() {
                w.line(format!("{} \"{}\"", import.alias(), import.path()));
            }
        });
        w.line(")");
    }
}
