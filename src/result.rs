//! Shared result alias for the scanner's nom sub-parsers.

use nom::IResult;
use nom_language::error::VerboseError;

pub type ScanResult<I, O> = IResult<I, O, VerboseError<I>>;
