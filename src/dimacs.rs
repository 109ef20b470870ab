/// DIMACS CNF text format parser (§6.1). Leniency follows
/// `original_source/Core_DPLL_Algorithm.py::parse_dimacs`: the `p cnf`
/// header's declared clause count is read but never enforced against the
/// actual number of clause terminators found.
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DimacsError {
    #[error("line {line}: expected a `p cnf <num_vars> <num_clauses>` header")]
    MissingHeader { line: usize },
    #[error("line {line}: malformed `p cnf` header")]
    MalformedHeader { line: usize },
    #[error("line {line}: literal {lit} has magnitude greater than the declared {num_vars} variables")]
    LiteralOutOfRange {
        line: usize,
        lit: i32,
        num_vars: u32,
    },
    #[error("line {line}: could not parse integer token {token:?}")]
    InvalidInteger { line: usize, token: String },
    #[error("unterminated clause: reached end of input without a closing 0")]
    UnterminatedClause,
}

pub struct Dimacs {
    pub num_vars: u32,
    pub clauses: Vec<Vec<i32>>,
}

impl Dimacs {
    /// Parses `input`, returning the declared variable count and the
    /// ordered list of clauses (each clause excludes its trailing `0`).
    pub fn parse(input: &str) -> Result<Dimacs, DimacsError> {
        let mut num_vars = None;
        let mut clauses = Vec::new();
        let mut current: Vec<i32> = Vec::new();

        for (line_no, raw_line) in input.lines().enumerate() {
            let line_no = line_no + 1;
            let line = raw_line.trim();

            if line.is_empty() || line.starts_with('c') || line.starts_with('%') || line == "0" {
                continue;
            }

            if let Some(header) = line.strip_prefix("p cnf") {
                let mut tokens = header.split_whitespace();
                let declared_vars: u32 = tokens
                    .next()
                    .ok_or(DimacsError::MalformedHeader { line: line_no })?
                    .parse()
                    .map_err(|_| DimacsError::MalformedHeader { line: line_no })?;
                // The declared clause count is read for format validation
                // but never checked against the actual clauses parsed.
                tokens
                    .next()
                    .ok_or(DimacsError::MalformedHeader { line: line_no })?
                    .parse::<u32>()
                    .map_err(|_| DimacsError::MalformedHeader { line: line_no })?;

                num_vars = Some(declared_vars);
                continue;
            }

            let declared_vars = num_vars.ok_or(DimacsError::MissingHeader { line: line_no })?;

            for token in line.split_whitespace() {
                let lit: i32 = token.parse().map_err(|_| DimacsError::InvalidInteger {
                    line: line_no,
                    token: token.to_string(),
                })?;

                if lit == 0 {
                    clauses.push(std::mem::take(&mut current));
                    continue;
                }

                if lit.unsigned_abs() > declared_vars {
                    return Err(DimacsError::LiteralOutOfRange {
                        line: line_no,
                        lit,
                        num_vars: declared_vars,
                    });
                }

                current.push(lit);
            }
        }

        if !current.is_empty() {
            return Err(DimacsError::UnterminatedClause);
        }

        Ok(Dimacs {
            num_vars: num_vars.unwrap_or(0),
            clauses,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_test() {
        let dimacs = "
        c test comment \n\
        p cnf 3 3      \n\
        1 -2 -3 0      \n\
        2 3 1 0        \n\
        1 0            \n\
        2 0
        ";

        let result = Dimacs::parse(dimacs).unwrap();
        assert_eq!(result.num_vars, 3);
        assert_eq!(result.clauses[0], vec![1, -2, -3]);
        assert_eq!(result.clauses[1], vec![2, 3, 1]);
        assert_eq!(result.clauses[2], vec![1]);
        assert_eq!(result.clauses[3], vec![2]);
    }

    #[test]
    fn ignores_percent_and_lone_zero_lines() {
        let dimacs = "p cnf 2 1\n% comment\n0\n1 2 0\n";
        let result = Dimacs::parse(dimacs).unwrap();
        assert_eq!(result.clauses, vec![vec![1, 2]]);
    }

    #[test]
    fn clause_may_span_multiple_lines() {
        let dimacs = "p cnf 3 1\n1 2\n3 0\n";
        let result = Dimacs::parse(dimacs).unwrap();
        assert_eq!(result.clauses, vec![vec![1, 2, 3]]);
    }

    #[test]
    fn rejects_literal_out_of_range() {
        let dimacs = "p cnf 1 1\n1 2 0\n";
        assert_eq!(
            Dimacs::parse(dimacs),
            Err(DimacsError::LiteralOutOfRange {
                line: 2,
                lit: 2,
                num_vars: 1
            })
        );
    }

    #[test]
    fn rejects_missing_header() {
        let dimacs = "1 2 0\n";
        assert_eq!(
            Dimacs::parse(dimacs),
            Err(DimacsError::MissingHeader { line: 1 })
        );
    }

    #[test]
    fn declared_clause_count_is_not_enforced() {
        // Header claims 5 clauses but only 1 is actually present.
        let dimacs = "p cnf 2 5\n1 2 0\n";
        let result = Dimacs::parse(dimacs).unwrap();
        assert_eq!(result.clauses.len(), 1);
    }

    #[test]
    fn rejects_unterminated_clause() {
        let dimacs = "p cnf 2 1\n1 2\n";
        assert_eq!(Dimacs::parse(dimacs), Err(DimacsError::UnterminatedClause));
    }
}
