use kit::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
enum Error {
    #[error("expected at least three inventories, but found {0}")]
    TooFewInventories(usize),
    #[error("calorie total overflows a 64-bit integer")]
    Overflow,
}

/// Calorie values carried by a single elf.
#[derive(Debug, Default, PartialEq, Eq)]
struct Inventory {
    calories: Vec<u64>,
}

impl Inventory {
    fn total(&self) -> Option<u64> {
        self.calories
            .iter()
            .try_fold(0u64, |total, &n| total.checked_add(n))
    }
}

fn main() -> Result<()> {
    kit::cli::run(Entry::new("d01"), |input| Ok(solve(&parse(input)?)?))
}

/// Parse blank line separated inventories.
///
/// The first inventory always exists, and every blank line starts a new one.
fn parse(input: Input<'_>) -> Result<Vec<Inventory>, InputError> {
    let mut output = Vec::new();
    let mut current = Inventory::default();

    for mut line in input.lines() {
        if line.is_blank() {
            output.push(std::mem::take(&mut current));
            continue;
        }

        current.calories.push(line.next()?);
        line.finish()?;
    }

    output.push(current);
    log::debug!("parsed {} inventories", output.len());
    Ok(output)
}

/// Returns the largest total, and the sum of the three largest totals.
fn solve(inventories: &[Inventory]) -> Result<(u64, u64), Error> {
    let mut totals = inventories
        .iter()
        .map(Inventory::total)
        .collect::<Option<Vec<_>>>()
        .ok_or(Error::Overflow)?;

    totals.sort_unstable();

    let &[.., a, b, c] = &totals[..] else {
        return Err(Error::TooFewInventories(totals.len()));
    };

    let top3 = c
        .checked_add(b)
        .and_then(|n| n.checked_add(a))
        .ok_or(Error::Overflow)?;

    Ok((c, top3))
}
