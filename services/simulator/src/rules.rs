//! Replacement rule and parity prediction

use shared::BeanColor;

use crate::tin::Tin;

/// Color of the bean that replaces a drawn pair
///
/// Two of a kind become Blue, a mixed pair becomes Green. Either way the
/// number of Green beans in the tin changes by 0 or -2, so its parity holds.
pub fn replacement_for(first: BeanColor, second: BeanColor) -> BeanColor {
    if first == second {
        BeanColor::Blue
    } else {
        BeanColor::Green
    }
}

/// Last bean the reduction must end on, decided before any draw
///
/// Green when the tin starts with an odd number of Green beans, Blue when
/// even. An empty tin has no last bean.
pub fn expected_last_bean(tin: &Tin) -> Option<BeanColor> {
    if tin.bean_count() == 0 {
        return None;
    }
    Some(parity_color(tin.count_of(BeanColor::Green)))
}

pub fn parity_color(greens: usize) -> BeanColor {
    if greens % 2 == 1 {
        BeanColor::Green
    } else {
        BeanColor::Blue
    }
}
