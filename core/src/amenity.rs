//! Hotel amenity bitmask table.
//!
//! List and info responses report amenities as an `amenityMask` integer in
//! which each set bit names one amenity.

/// A single amenity and its bit in the mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Amenity {
    pub bit: u32,
    pub description: &'static str,
}

const fn amenity(bit: u32, description: &'static str) -> Amenity {
    Amenity { bit, description }
}

/// Every known amenity, in ascending bit order.
pub static AMENITIES: [Amenity; 28] = [
    amenity(1, "Business Center"),
    amenity(1 << 1, "Fitness Center"),
    amenity(1 << 2, "Hot Tub On-site"),
    amenity(1 << 3, "Internet Access Available"),
    amenity(1 << 4, "Kids' Activities"),
    amenity(1 << 5, "Kitchen or Kitchenette"),
    amenity(1 << 6, "Pets Allowed"),
    amenity(1 << 7, "Pool"),
    amenity(1 << 8, "Restaurant On-site"),
    amenity(1 << 9, "Spa On-site"),
    amenity(1 << 10, "Whirlpool Bath Available"),
    amenity(1 << 11, "Breakfast"),
    amenity(1 << 12, "Babysitting"),
    amenity(1 << 13, "Jacuzzi"),
    amenity(1 << 14, "Parking"),
    amenity(1 << 15, "Room Service"),
    amenity(1 << 16, "Accessible Path of Travel"),
    amenity(1 << 17, "Accessible Bathroom"),
    amenity(1 << 18, "Roll-in Shower"),
    amenity(1 << 19, "Handicapped Parking"),
    amenity(1 << 20, "In-room Accessibility"),
    amenity(1 << 21, "Accessibility Equipment for the Deaf"),
    amenity(1 << 22, "Braille or Raised Signage"),
    amenity(1 << 23, "Free Airport Shuttle"),
    amenity(1 << 24, "Indoor Pool"),
    amenity(1 << 25, "Outdoor Pool"),
    amenity(1 << 26, "Extended Parking"),
    amenity(1 << 27, "Free Parking"),
];

/// Union of every bit in the table.
pub const KNOWN_MASK: u32 = (1 << 28) - 1;

/// Amenities whose bit is set in `mask`. Unknown bits are ignored.
pub fn decode(mask: Option<u32>) -> Vec<&'static Amenity> {
    let Some(mask) = mask else {
        return Vec::new();
    };
    AMENITIES.iter().filter(|a| mask & a.bit != 0).collect()
}

/// Descriptions of the amenities set in `mask`.
pub fn names(mask: Option<u32>) -> Vec<&'static str> {
    decode(mask).into_iter().map(|a| a.description).collect()
}

pub fn encode<'a>(amenities: impl IntoIterator<Item = &'a Amenity>) -> u32 {
    amenities.into_iter().fold(0, |mask, a| mask | a.bit)
}

pub fn lookup(bit: u32) -> Option<&'static Amenity> {
    AMENITIES.iter().find(|a| a.bit == bit)
}
