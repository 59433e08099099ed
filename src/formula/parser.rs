use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    str::FromStr,
};

use flate2::read::MultiGzDecoder;
use log::{debug, warn};

use crate::{Clause, Formula, FormulaError, Lit, Result, formula::error::ParserError};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Header {
    vars: u32,
    clauses: usize,
}

impl Header {
    fn parse(line: &str, lineno: usize) -> std::result::Result<Self, ParserError> {
        let invalid = || ParserError::InvalidHeader {
            line: lineno,
            content: line.trim().to_string(),
        };
        let tokens = line.split_whitespace().collect::<Vec<&str>>();
        if tokens.len() != 4 || tokens[0] != "p" || tokens[1] != "cnf" {
            return Err(invalid());
        }
        let vars = tokens[2]
            .parse::<u32>()
            .ok()
            .filter(|&vars| vars <= Formula::MAX_VARS)
            .ok_or_else(invalid)?;
        let clauses = tokens[3].parse::<usize>().map_err(|_| invalid())?;
        Ok(Header { vars, clauses })
    }
}

fn read_lit(token: &str, lineno: usize) -> Result<i64> {
    token.parse::<i64>().map_err(|_| {
        ParserError::InvalidToken {
            line: lineno,
            token: token.to_string(),
        }
        .into()
    })
}

impl Formula {
    /// Reads a DIMACS CNF formula, plain or gzip-compressed.
    ///
    /// Variable `i` of the file becomes [`Var`] `i - 1`. The variable count is the
    /// maximum of the header's count and the largest variable actually used.
    /// Clauses may span several lines, and a `%` line ends the input (SATLIB style).
    ///
    /// [`Var`]: crate::Var
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let mut reader = BufReader::new(reader);
        let is_gzip = reader
            .fill_buf()
            .map_err(ParserError::from)?
            .starts_with(&GZIP_MAGIC);
        if is_gzip {
            debug!("gzip compressed input detected");
            Formula::from_dimacs(BufReader::new(MultiGzDecoder::new(reader)))
        } else {
            Formula::from_dimacs(reader)
        }
    }

    /// Opens and reads a DIMACS CNF file, see [`Formula::from_reader`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let f = File::open(path.as_ref()).map_err(|e| {
            ParserError::IoError(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Formula::from_reader(f)
    }

    fn from_dimacs(reader: impl BufRead) -> Result<Self> {
        let mut header: Option<Header> = None;
        let mut formula = Formula::new();
        let mut clause = Clause::new();

        for (i, line) in reader.lines().enumerate() {
            let lineno = i + 1;
            let line = line.map_err(ParserError::from)?;
            let trimmed = line.trim_start();

            if trimmed.is_empty() || trimmed.starts_with('c') {
                continue;
            }
            if trimmed.starts_with('%') {
                break;
            }
            if trimmed.starts_with('p') {
                let h = Header::parse(trimmed, lineno)?;
                formula.reserve_vars(h.vars);
                header = Some(h);
                continue;
            }
            if header.is_none() {
                return Err(ParserError::MissingHeader(lineno).into());
            }

            for token in trimmed.split_whitespace() {
                let x = read_lit(token, lineno)?;
                if x == 0 {
                    formula.add_clause(std::mem::take(&mut clause));
                    continue;
                }
                let lit = Lit::try_from(x).map_err(|e| match e {
                    FormulaError::VariableOutOfRange(_) => ParserError::InvalidToken {
                        line: lineno,
                        token: token.to_string(),
                    }
                    .into(),
                    e => e,
                })?;
                formula.reserve_vars(lit.var().index() + 1);
                clause.push(lit);
            }
        }

        if !clause.is_empty() {
            return Err(ParserError::UnterminatedClause.into());
        }

        match header {
            Some(h) if h.clauses != formula.num_clauses() => warn!(
                "header announces {} clauses, found {}",
                h.clauses,
                formula.num_clauses()
            ),
            Some(h) if h.vars < formula.num_vars() => warn!(
                "header announces {} variables, found {}",
                h.vars,
                formula.num_vars()
            ),
            Some(_) => (),
            // An input without any header nor clause is the empty formula.
            None => debug!("no header found, empty formula"),
        }

        Ok(formula)
    }
}

impl FromStr for Formula {
    type Err = FormulaError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Formula::from_reader(s.as_bytes())
    }
}
