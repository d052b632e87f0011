use std::fmt;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use crate::error::HimenoError;

/// Named problem size. Dimensions are `(mimax, mjmax, mkmax)` and include the
/// boundary shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GridSize {
    XS,
    S,
    M,
    L,
    XL,
}

impl GridSize {
    pub const ALL: [GridSize; 5] = [GridSize::XS, GridSize::S, GridSize::M, GridSize::L, GridSize::XL];

    pub const fn dims(self) -> (usize, usize, usize) {
        match self {
            GridSize::XS => (32, 32, 64),
            GridSize::S => (64, 64, 128),
            GridSize::M => (128, 128, 256),
            GridSize::L => (257, 257, 513),
            GridSize::XL => (512, 512, 1024),
        }
    }

    /// `(imax, jmax, kmax)`: one less than the full dimensions on every axis.
    pub const fn interior(self) -> (usize, usize, usize) {
        let (mi, mj, mk) = self.dims();
        (mi - 1, mj - 1, mk - 1)
    }

    pub const fn name(self) -> &'static str {
        match self {
            GridSize::XS => "XS",
            GridSize::S => "S",
            GridSize::M => "M",
            GridSize::L => "L",
            GridSize::XL => "XL",
        }
    }

    /// Prints the preset menu and reads one token from `input`.
    pub fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<GridSize, HimenoError> {
        writeln!(out, "For example: ")?;
        for (n, size) in GridSize::ALL.iter().enumerate() {
            let (mi, mj, mk) = size.dims();
            if n == 0 {
                writeln!(out, " Grid-size= {:<2} ({}x{}x{})", size.name(), mi, mj, mk)?;
            } else {
                writeln!(out, "\t    {:<2} ({}x{}x{})", size.name(), mi, mj, mk)?;
            }
        }
        writeln!(out)?;
        write!(out, "Grid-size = ")?;
        out.flush()?;

        let mut line = String::new();
        input.read_line(&mut line)?;
        writeln!(out)?;

        // 最初の空白区切りトークンだけを使う
        line.split_whitespace().next().unwrap_or("").parse()
    }

    /// [`GridSize::prompt`] on the process stdin/stdout.
    pub fn prompt_stdin() -> Result<GridSize, HimenoError> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        GridSize::prompt(&mut stdin.lock(), &mut stdout.lock())
    }
}

impl FromStr for GridSize {
    type Err = HimenoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GridSize::ALL
            .into_iter()
            .find(|size| size.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| HimenoError::UnknownGridSize(s.to_string()))
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
