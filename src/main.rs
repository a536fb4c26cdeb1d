use md4_collision::{bytes_to_hex, find_collision_parallel, Hasher, Md4};

fn main() {
    let pair = find_collision_parallel();
    let digest = Md4::digest_message(&pair.message);
    let sibling_digest = Md4::digest_message(&pair.sibling);

    println!("m1:      {}", bytes_to_hex(&pair.message));
    println!("m2:      {}", bytes_to_hex(&pair.sibling));
    println!("m1 hash: {}", bytes_to_hex(&digest));
    println!("m2 hash: {}", bytes_to_hex(&sibling_digest));

    assert_eq!(digest, sibling_digest);
    println!("Success!");
}
