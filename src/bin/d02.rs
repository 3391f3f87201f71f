use kit::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    #[cfg(test)]
    const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    fn score(self) -> u64 {
        match self {
            Move::Rock => 1,
            Move::Paper => 2,
            Move::Scissors => 3,
        }
    }

    /// The outcome of playing this move against `opponent`.
    fn against(self, opponent: Move) -> Outcome {
        use Move::*;

        match (opponent, self) {
            (Scissors, Rock) | (Rock, Paper) | (Paper, Scissors) => Outcome::Win,
            (a, b) if a == b => Outcome::Draw,
            _ => Outcome::Loss,
        }
    }

    /// The move which produces `outcome` when played against `opponent`.
    fn for_outcome(opponent: Move, outcome: Outcome) -> Move {
        use Move::*;

        match (opponent, outcome) {
            (m, Outcome::Draw) => m,
            (Rock, Outcome::Win) | (Scissors, Outcome::Loss) => Paper,
            (Paper, Outcome::Win) | (Rock, Outcome::Loss) => Scissors,
            (Scissors, Outcome::Win) | (Paper, Outcome::Loss) => Rock,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Loss,
    Draw,
    Win,
}

impl Outcome {
    #[cfg(test)]
    const ALL: [Outcome; 3] = [Outcome::Loss, Outcome::Draw, Outcome::Win];

    fn score(self) -> u64 {
        match self {
            Outcome::Loss => 0,
            Outcome::Draw => 3,
            Outcome::Win => 6,
        }
    }
}

/// First column, the opponent's move.
struct Opponent(Move);

kit::from_input! {
    |W(v): W<&str>| -> Opponent {
        Ok(Opponent(match v {
            "A" => Move::Rock,
            "B" => Move::Paper,
            "C" => Move::Scissors,
            other => bail!("expected `A`, `B` or `C`, but got `{other}`"),
        }))
    }
}

/// Second column, which is either a move or an outcome depending on how the
/// guide is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Code {
    X,
    Y,
    Z,
}

impl Code {
    fn as_move(self) -> Move {
        match self {
            Code::X => Move::Rock,
            Code::Y => Move::Paper,
            Code::Z => Move::Scissors,
        }
    }

    fn as_outcome(self) -> Outcome {
        match self {
            Code::X => Outcome::Loss,
            Code::Y => Outcome::Draw,
            Code::Z => Outcome::Win,
        }
    }
}

kit::from_input! {
    |W(v): W<&str>| -> Code {
        Ok(match v {
            "X" => Code::X,
            "Y" => Code::Y,
            "Z" => Code::Z,
            other => bail!("expected `X`, `Y` or `Z`, but got `{other}`"),
        })
    }
}

/// A round where both moves are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Round {
    opponent: Move,
    response: Move,
}

impl Round {
    fn score(&self) -> u64 {
        self.response.score() + self.response.against(self.opponent).score()
    }
}

/// A round where the outcome is known, and the response has to be derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Plan {
    opponent: Move,
    outcome: Outcome,
}

impl Plan {
    fn response(&self) -> Move {
        Move::for_outcome(self.opponent, self.outcome)
    }

    fn score(&self) -> u64 {
        self.response().score() + self.outcome.score()
    }
}

fn main() -> Result<()> {
    kit::cli::run(Entry::new("d02").timed(), |input| {
        let (rounds, plans) = parse(input)?;
        Ok(solve(&rounds, &plans))
    })
}

/// Parse the strategy guide both ways at once.
fn parse(input: Input<'_>) -> Result<(Vec<Round>, Vec<Plan>), InputError> {
    let mut rounds = Vec::new();
    let mut plans = Vec::new();

    for mut line in input.lines() {
        let (Opponent(opponent), code) = line.next::<(Opponent, Code)>()?;
        line.finish()?;

        rounds.push(Round {
            opponent,
            response: code.as_move(),
        });

        plans.push(Plan {
            opponent,
            outcome: code.as_outcome(),
        });
    }

    log::debug!("parsed {} rounds", rounds.len());
    Ok((rounds, plans))
}

fn solve(rounds: &[Round], plans: &[Plan]) -> (u64, u64) {
    let part1 = rounds.iter().map(Round::score).sum();
    let part2 = plans.iter().map(Plan::score).sum();
    (part1, part2)
}

#[cfg(test)]
mod tests {
    use kit::input::ErrorKind;

    use super::*;

    const EXAMPLE: &str = include_str!("../../inputs/example/d02.txt");

    fn run(input: &str) -> Result<(u64, u64), InputError> {
        let (rounds, plans) = parse(Input::new(input.as_bytes()))?;
        Ok(solve(&rounds, &plans))
    }

    #[test]
    fn test_example() {
        assert_eq!(run(EXAMPLE).unwrap(), (15, 12));
        assert_eq!(run(EXAMPLE).unwrap(), run(EXAMPLE).unwrap());
    }

    #[test]
    fn test_round_scores() {
        use Move::*;

        let rounds = [(Rock, Paper), (Paper, Rock), (Scissors, Scissors)]
            .map(|(opponent, response)| Round { opponent, response });

        assert_eq!(rounds.map(|r| r.score()), [8, 1, 6]);
        assert_eq!(solve(&rounds, &[]), (15, 0));
    }

    #[test]
    fn test_plan_scores() {
        let (_, plans) = parse(Input::new(EXAMPLE.as_bytes())).unwrap();

        assert_eq!(
            plans.iter().map(Plan::response).collect::<Vec<_>>(),
            [Move::Rock, Move::Rock, Move::Rock]
        );

        assert_eq!(plans.iter().map(Plan::score).collect::<Vec<_>>(), [4, 1, 7]);
    }

    #[test]
    fn test_wins() {
        use Move::*;
        assert_eq!(Rock.against(Scissors), Outcome::Win);
        assert_eq!(Paper.against(Rock), Outcome::Win);
        assert_eq!(Scissors.against(Paper), Outcome::Win);
        assert_eq!(Scissors.against(Rock), Outcome::Loss);
    }

    #[test]
    fn test_scores_in_range() {
        for opponent in Move::ALL {
            for response in Move::ALL {
                let score = Round { opponent, response }.score();
                assert!((1..=9).contains(&score), "{opponent:?} vs {response:?}: {score}");
            }

            for outcome in Outcome::ALL {
                let score = Plan { opponent, outcome }.score();
                assert!((1..=9).contains(&score), "{opponent:?} / {outcome:?}: {score}");
            }
        }
    }

    #[test]
    fn test_derived_move_reproduces_outcome() {
        for opponent in Move::ALL {
            for outcome in Outcome::ALL {
                let response = Move::for_outcome(opponent, outcome);
                assert_eq!(response.against(opponent), outcome);

                let plan = Plan { opponent, outcome };
                let round = Round { opponent, response };
                assert_eq!(plan.score(), round.score());
            }
        }
    }

    #[test]
    fn test_crlf_and_no_trailing_newline() {
        assert_eq!(run("A Y\r\nB X\r\nC Z").unwrap(), (15, 12));
        assert_eq!(run("").unwrap(), (0, 0));
    }

    #[test]
    fn test_bad_tokens() {
        let error = run("A Y\nD X\n").unwrap_err();
        assert_eq!(error.to_string(), "expected `A`, `B` or `C`, but got `D`");
        assert_eq!(error.span(), 4..5);

        let error = run("A W\n").unwrap_err();
        assert_eq!(error.to_string(), "expected `X`, `Y` or `Z`, but got `W`");
        assert_eq!(error.span(), 2..3);

        let error = run("X A\n").unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::Custom(..)));

        let error = run("AX Y\n").unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::Custom(..)));
    }

    #[test]
    fn test_token_count() {
        let error = run("A\n").unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::ExpectedTuple(2)));

        let error = run("A Y\n\nB X\n").unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::ExpectedTuple(2)));

        let error = run("A Y Z\n").unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::TrailingInput(..)));
        assert_eq!(error.span(), 4..5);
    }
}
