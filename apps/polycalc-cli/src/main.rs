use std::io::stdin;

fn main() {
    polycalc_cli::run(stdin().lock());
}
