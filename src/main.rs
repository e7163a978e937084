use std::{
    env,
    io::{self, BufRead},
};

use huffman_tree::{bits, compute_frequencies, CodeTree};

fn main() -> io::Result<()> {
    let verbosity = if env::var_os("HUFFMAN_TREE_DEBUG").is_some() {
        3
    } else {
        1
    };
    stderrlog::new()
        .verbosity(verbosity)
        .init()
        .map_err(io::Error::other)?;

    println!("Enter the string to encode:");
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let input = line.trim_end_matches(['\r', '\n']);

    let tree = CodeTree::build(&compute_frequencies(input.chars()))?;
    let encoded = tree.encode(input.chars())?;
    println!("Encoded string: {}", bits::render(&encoded));

    // A single-symbol alphabet encodes to zero bits, so the length has to
    // travel separately.
    let decoded: String = tree
        .decode_exact(&encoded, input.chars().count())?
        .into_iter()
        .collect();
    println!("Decoded string: {decoded}");

    Ok(())
}
