use rust_decimal::Decimal;
use sovran_namevalue::{MapError, NameValues, Value};

fn main() -> Result<(), MapError> {
    // Fields as they might arrive from a submitted form
    let form = NameValues::new([
        ("CustomerName", Value::from("Zaldy")),
        ("Quantity", Value::from("3")),
        ("UnitPrice", Value::from("1,299.95")),
        ("GiftWrap", Value::from("on")),
        ("Colors", Value::from("red,green")),
        ("Discount", Value::from("ten percent")),
    ]);

    let (quantity, _) = form.int64("quantity");
    let (price, _) = form.decimal("unitprice");
    println!("Total: {}", price * Decimal::from(quantity));

    match form.bool("giftwrap") {
        (true, _) => println!("Gift wrap requested"),
        (false, true) => println!("No gift wrap"),
        (false, false) => println!("Gift wrap not specified"),
    }

    for color in form.strings("colors") {
        println!("Color: {}", color);
    }

    // The lenient accessor hides the malformed discount
    println!("Discount (lenient): {:?}", form.int("discount"));

    // The strict accessor explains it
    match form.try_get::<i32>("discount") {
        Ok(discount) => println!("Discount: {}", discount),
        Err(e) => println!("Discount rejected: {}", e),
    }

    let ordered = form.sort_by_key(&["customername", "quantity", "unitprice"]);
    let (summary, args) =
        ordered.interpolate("${customername} ordered ${quantity} at ${unitprice} (${coupon})");
    println!("{}", summary);
    println!("Bound values: {:?}", args);

    // Absent names are reported, not guessed
    let (coupon, exists) = form.string("coupon");
    println!("Coupon: {:?} (present: {})", coupon, exists);

    form.try_get::<i64>("quantity").map(|q| println!("Strict quantity: {}", q))
}
